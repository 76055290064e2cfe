//! Participant entities
//!
//! Plain data: the physics step and elimination code mutate fields directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_Z_BASE;

/// Lifecycle status of an entity within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    /// Moving, colliding and eligible to win
    Live,
    /// Eliminated; falls off screen cosmetically
    Dead,
    /// Round winner, locked in place
    Frozen,
}

/// One participant in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within a round
    pub id: u32,
    pub code: String,
    pub name: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub status: EntityStatus,
    /// Draw order; eliminations get increasing values so later losers draw on top
    pub z_order: u32,
}

impl Entity {
    pub fn new(id: u32, code: impl Into<String>, name: impl Into<String>, radius: f32) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            status: EntityStatus::Live,
            z_order: SPAWN_Z_BASE + id,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.status == EntityStatus::Live
    }

    /// Lock the entity in place as the round winner
    pub fn freeze(&mut self) {
        self.status = EntityStatus::Frozen;
        self.vel = Vec2::ZERO;
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}
