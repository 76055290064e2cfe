//! Per-frame simulation step
//!
//! Runs once per display frame. Arena updates happen first, then a single
//! pass over the entities in index order handles motion, the wall, and
//! pairwise collisions against later entities.

use glam::Vec2;
use rand::Rng;

use super::collision::{pair_contact, reflect_if_approaching, wall_contact};
use super::elimination::{Elimination, eliminate};
use super::entity::{Entity, EntityStatus};
use super::state::{GameState, MatchPhase, Viewport};
use crate::consts::*;
use crate::settings::{EliminationPolicy, Settings};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Indices eliminated this frame, in elimination order
    pub eliminated: Vec<usize>,
    /// Entities still standing after the pass
    pub standing: usize,
    /// Round survivor, frozen during this frame
    pub survivor: Option<usize>,
}

#[inline]
fn take_z(next_z: &mut u32) -> u32 {
    let z = *next_z;
    *next_z += 1;
    z
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, settings: &Settings) -> TickReport {
    let phase = state.phase;
    let speed = settings.game_speed;

    state.arena.min_radius = settings.min_arena_radius;
    state.arena.gap.width = settings.gap_size.clamp(0.0, 1.0);

    if phase == MatchPhase::Playing {
        let live = state.live_count();
        state.arena.shrink(settings.shrink_rate * speed, live);
    }
    if phase.is_active() {
        state.arena.rotate_gap(settings.rotation_speed * speed);
    }

    let mut report = TickReport::default();
    let GameState {
        entities,
        arena,
        viewport,
        initial_count,
        next_z,
        rng,
        ..
    } = state;

    for i in 0..entities.len() {
        let (head, tail) = entities.split_at_mut(i + 1);
        let entity = &mut head[i];

        match entity.status {
            EntityStatus::Frozen => continue,
            EntityStatus::Dead => {
                fall(entity, viewport, speed);
                continue;
            }
            EntityStatus::Live => {}
        }

        entity.pos += entity.vel * speed;

        if phase == MatchPhase::Spawning {
            let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
            entity.vel += jitter * settings.vibration_strength * speed;
            entity.vel += (arena.center - entity.pos) * SPAWN_CENTER_PULL;
        }

        if let Some(contact) = wall_contact(entity.pos, entity.radius, arena.center, arena.radius) {
            if phase == MatchPhase::Playing && arena.is_in_gap(entity.pos) {
                // Passing through: no bounce, gone once fully outside
                if contact.distance > arena.radius + entity.radius {
                    eliminate(entity, Elimination::GapExit, take_z(next_z));
                    report.eliminated.push(i);
                    continue;
                }
            } else {
                entity.vel = reflect_if_approaching(entity.vel, contact.normal);
                entity.pos -= contact.normal * (contact.overlap + BOUNCE_MARGIN);
                entity.vel *= BOUNCE_DAMPING;
            }
        }

        for (offset, other) in tail.iter_mut().enumerate() {
            if !other.is_live() {
                continue;
            }
            let Some(contact) = pair_contact(entity.pos, entity.radius, other.pos, other.radius)
            else {
                continue;
            };

            let separation = contact.normal * contact.overlap * OVERLAP_SEPARATION;
            entity.pos -= separation;
            other.pos += separation;

            if !phase.is_active() {
                let impulse = contact.normal * MENU_IMPULSE;
                entity.vel -= impulse;
                other.vel += impulse;
                continue;
            }

            let impulse = contact.normal * settings.collision_force;
            entity.vel -= impulse;
            other.vel += impulse;
            let push = contact.normal * ANTI_STICK_PUSH;
            entity.pos -= push;
            other.pos += push;

            if phase == MatchPhase::Playing
                && settings.elimination_policy == EliminationPolicy::CollisionCoinFlip
            {
                let z = take_z(next_z);
                if rng.random_bool(0.5) {
                    eliminate(entity, Elimination::KnockedOut { from: other.pos }, z);
                    report.eliminated.push(i);
                    break;
                }
                eliminate(other, Elimination::KnockedOut { from: entity.pos }, z);
                report.eliminated.push(i + 1 + offset);
            }
        }
    }

    if phase == MatchPhase::Playing && *initial_count > 1 {
        let mut live = entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_live())
            .map(|(i, _)| i);
        let survivor = match (live.next(), live.next()) {
            (Some(i), None) => Some(i),
            // Everyone left in the same frame: the last one out stands
            (None, _) => report.eliminated.last().copied(),
            _ => None,
        };

        if let Some(idx) = survivor {
            entities[idx].freeze();
            report.survivor = Some(idx);
        }
    }

    report.standing = entities
        .iter()
        .filter(|e| e.status != EntityStatus::Dead)
        .count();
    report
}

/// Cosmetic projectile motion for eliminated entities
fn fall(entity: &mut Entity, viewport: &Viewport, speed: f32) {
    entity.vel.y += DEAD_GRAVITY * speed;
    entity.vel.x *= DEAD_AIR_DRAG.powf(speed);
    entity.pos += entity.vel * speed;

    let floor = viewport.height;
    if entity.pos.y + entity.radius > floor {
        entity.pos.y = floor - entity.radius;
        entity.vel.y *= -DEAD_FLOOR_RESTITUTION;
        entity.vel.x *= DEAD_FLOOR_FRICTION;
    }

    if entity.pos.x - entity.radius < 0.0 {
        entity.pos.x = entity.radius;
        entity.vel.x *= -DEAD_WALL_RESTITUTION;
    } else if entity.pos.x + entity.radius > viewport.width {
        entity.pos.x = viewport.width - entity.radius;
        entity.vel.x *= -DEAD_WALL_RESTITUTION;
    }
}
