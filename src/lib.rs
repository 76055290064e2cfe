//! Flag Royale - A shrinking-arena elimination battle royale
//!
//! Core modules:
//! - `sim`: Simulation engine (entities, arena geometry, physics, match flow)
//! - `ranking`: Cross-round win tally and champion detection
//! - `roster`: Participant descriptors and per-round selection
//! - `schedule`: Frame clock, loop handle and one-shot/repeating timers
//! - `settings`: Tunable match configuration

pub mod error;
pub mod ranking;
pub mod roster;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use error::{EngineError, EngineResult};
pub use ranking::{RankingEntry, Rankings};
pub use roster::{Participant, Roster};
pub use settings::{DegenerateRoundPolicy, EliminationPolicy, Settings};
pub use sim::{Engine, EngineEvent, FrameSnapshot, MatchPhase, RoundWinner, StartOutcome};

use glam::Vec2;

/// Engine constants. Motion values are per frame, tuned for a 60 Hz display.
pub mod consts {
    use std::f32::consts::FRAC_PI_2;

    /// Nominal frame duration the per-frame constants were tuned at
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum physics frames run per host update (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest host delta accepted per update (seconds)
    pub const MAX_HOST_DT: f32 = 0.1;

    /// Arena radius used before a viewport is known
    pub const DEFAULT_ARENA_RADIUS: f32 = 300.0;
    /// Initial arena radius as a fraction of the smaller viewport extent
    pub const ARENA_VIEWPORT_FRACTION: f32 = 0.45;
    /// Viewports narrower than this are treated as not laid out yet
    pub const MIN_VIEWPORT_WIDTH: f32 = 100.0;

    /// Offset between the physical atan2 origin (+x) and the gap's "up" origin
    pub const GAP_ANGLE_OFFSET: f32 = FRAC_PI_2;

    /// Spawn cluster half-extent around the arena center
    pub const SPAWN_SCATTER: f32 = 50.0;
    /// Spawn speed range (px/frame)
    pub const SPAWN_SPEED_MIN: f32 = 2.0;
    pub const SPAWN_SPEED_MAX: f32 = 4.0;
    /// Pull toward the center while spawning (fraction of the offset per frame)
    pub const SPAWN_CENTER_PULL: f32 = 0.05;

    /// Velocity retained after a wall bounce
    pub const BOUNCE_DAMPING: f32 = 0.99;
    /// Extra push-back past the wall overlap
    pub const BOUNCE_MARGIN: f32 = 1.0;

    /// Fraction of the overlap each entity of a colliding pair is pushed
    pub const OVERLAP_SEPARATION: f32 = 0.8;
    /// Constant extra separation per entity to prevent sticking
    pub const ANTI_STICK_PUSH: f32 = 2.0;
    /// Impulse used for idle collisions in the menu
    pub const MENU_IMPULSE: f32 = 4.0;

    /// Velocity retained when squeezing out through the gap
    pub const GAP_EXIT_DAMPING: f32 = 0.4;
    /// Upward pop applied on gap exit
    pub const GAP_EXIT_POP: f32 = 2.0;
    /// Speed of a knocked-out entity
    pub const KNOCKOUT_SPEED: f32 = 12.0;
    /// Upward lift of a knocked-out entity
    pub const KNOCKOUT_LIFT: f32 = 5.0;

    /// Cosmetic fall of eliminated entities
    pub const DEAD_GRAVITY: f32 = 0.8;
    pub const DEAD_AIR_DRAG: f32 = 0.99;
    pub const DEAD_FLOOR_RESTITUTION: f32 = 0.4;
    pub const DEAD_FLOOR_FRICTION: f32 = 0.8;
    pub const DEAD_WALL_RESTITUTION: f32 = 0.5;

    /// First z-order handed out on elimination
    pub const ELIMINATION_Z_BASE: u32 = 100;
    /// z-order of freshly spawned entities (plus spawn index)
    pub const SPAWN_Z_BASE: u32 = 20_000;

    /// Auto-restart countdown start value (one tick per second)
    pub const AUTO_RESTART_COUNTDOWN: u32 = 4;
    /// Pause between the countdown reaching zero and the next round
    pub const RESTART_GRACE_SECS: f32 = 1.0;
    /// Retry interval while waiting for a usable viewport
    pub const DEFERRED_START_RETRY_SECS: f32 = 0.1;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to a cartesian offset
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a cartesian offset to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(offset: Vec2) -> (f32, f32) {
    (offset.length(), offset.y.atan2(offset.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_polar_roundtrip_angle() {
        let p = polar_to_cartesian(10.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 10.0).abs() < 1e-4);
        assert!((theta - PI / 3.0).abs() < 1e-4);
    }
}
