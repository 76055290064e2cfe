//! Simulation module
//!
//! All gameplay logic lives here:
//! - Per-frame constants, one `tick` per display frame
//! - Seedable RNG owned by the state
//! - Entities processed in spawn-index order
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod elimination;
pub mod engine;
pub mod entity;
pub mod state;
pub mod tick;

pub use arena::{Arena, GapWindow};
pub use collision::{PairContact, WallContact, pair_contact, reflect_velocity, wall_contact};
pub use elimination::{Elimination, eliminate};
pub use engine::{Engine, EngineEvent, EntitySnapshot, FrameSnapshot, RoundWinner, StartOutcome};
pub use entity::{Entity, EntityStatus};
pub use state::{GameState, MatchPhase, Viewport};
pub use tick::{TickReport, tick};
