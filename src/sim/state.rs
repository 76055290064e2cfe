//! Simulation state and core types
//!
//! `GameState` is the single owner of everything the frame step mutates.
//! It is replaced wholesale (entities, arena size, gap) at each round start.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::entity::{Entity, EntityStatus};
use crate::consts::*;
use crate::roster::Participant;
use crate::settings::Settings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Idle; leftover entities may still drift and collide
    Menu,
    /// Entities clustered at the center, walls fully reflective
    Spawning,
    /// Arena shrinks and the gap is a live exit
    Playing,
    /// Round concluded with a frozen survivor
    Winner,
    /// A participant reached the points threshold
    Champion,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Menu => "menu",
            MatchPhase::Spawning => "spawning",
            MatchPhase::Playing => "playing",
            MatchPhase::Winner => "winner",
            MatchPhase::Champion => "champion",
        }
    }

    /// Phases in which the gap rotates and collisions use the full impulse
    pub fn is_active(&self) -> bool {
        matches!(self, MatchPhase::Spawning | MatchPhase::Playing)
    }
}

/// Host viewport in pixels; the arena is centered in it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Usable once laid out with a non-trivial size
    pub fn is_ready(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= MIN_VIEWPORT_WIDTH
            && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Arena radius at round start for this viewport
    pub fn initial_arena_radius(&self) -> f32 {
        self.width.min(self.height) * ARENA_VIEWPORT_FRACTION
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: MatchPhase,
    pub viewport: Viewport,
    pub arena: Arena,
    /// Current round's entities, indexed by spawn order
    pub entities: Vec<Entity>,
    /// Entity count at round start
    pub initial_count: usize,
    /// Rounds started so far
    pub round: u32,
    /// Next elimination z-order
    pub(super) next_z: u32,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create an idle state seeded from entropy
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Create an idle state with a fixed seed (tests, replays of a session)
    pub fn seeded(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, rng: Pcg32) -> Self {
        Self {
            phase: MatchPhase::Menu,
            viewport: Viewport::default(),
            arena: Arena::new(
                Vec2::ZERO,
                DEFAULT_ARENA_RADIUS,
                settings.min_arena_radius,
                settings.gap_size,
            ),
            entities: Vec::new(),
            initial_count: 0,
            round: 0,
            next_z: ELIMINATION_Z_BASE,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_live()).count()
    }

    /// Entities not yet eliminated (live or frozen), as shown on the HUD
    pub fn standing_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.status != EntityStatus::Dead)
            .count()
    }

    /// Index of the sole live or frozen entity, if exactly one remains
    pub fn survivor(&self) -> Option<usize> {
        let mut standing = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.status != EntityStatus::Dead);
        match (standing.next(), standing.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    /// Replace the entity collection with a fresh cluster at the arena center.
    ///
    /// Also restores the arena to full size with the gap at angle 0.
    pub fn spawn_round(&mut self, participants: &[Participant], settings: &Settings) {
        let center = self.viewport.center();
        self.arena
            .reset(center, self.viewport.initial_arena_radius());
        self.arena.min_radius = settings.min_arena_radius;
        self.arena.gap.width = settings.gap_size;

        let rng = &mut self.rng;
        self.entities = participants
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut entity = Entity::new(i as u32, &p.code, &p.name, settings.flag_size);
                entity.pos = center
                    + Vec2::new(
                        rng.random_range(-SPAWN_SCATTER..SPAWN_SCATTER),
                        rng.random_range(-SPAWN_SCATTER..SPAWN_SCATTER),
                    );
                let heading = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX);
                entity.vel = Vec2::new(heading.cos(), heading.sin()) * speed;
                entity
            })
            .collect();

        self.initial_count = self.entities.len();
        self.round += 1;
    }
}
