//! Elimination
//!
//! Marks the loser dead and gives it a cosmetic exit trajectory. No match
//! logic happens here; the frame step decides when a round is over.

use glam::Vec2;

use super::entity::{Entity, EntityStatus};
use crate::consts::{GAP_EXIT_DAMPING, GAP_EXIT_POP, KNOCKOUT_LIFT, KNOCKOUT_SPEED};

/// Why an entity left the round
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elimination {
    /// Squeezed out through the gap on its own
    GapExit,
    /// Knocked out by another entity standing at `from`
    KnockedOut { from: Vec2 },
}

/// Eliminate `loser`, assigning it the given draw order.
///
/// Screen space is y-down, so "up" is negative y.
pub fn eliminate(loser: &mut Entity, cause: Elimination, z_order: u32) {
    loser.status = EntityStatus::Dead;
    loser.z_order = z_order;

    match cause {
        Elimination::GapExit => {
            loser.vel *= GAP_EXIT_DAMPING;
            loser.vel.y -= GAP_EXIT_POP;
        }
        Elimination::KnockedOut { from } => {
            let away = loser.pos - from;
            let angle = away.y.atan2(away.x);
            loser.vel = Vec2::new(
                angle.cos() * KNOCKOUT_SPEED,
                angle.sin() * KNOCKOUT_SPEED - KNOCKOUT_LIFT,
            );
        }
    }

    log::debug!("{} ({}) eliminated: {:?}", loser.name, loser.code, cause);
}
