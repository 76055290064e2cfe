//! Error types for the simulation engine.
//!
//! Layout problems (unknown viewport) are not errors: round starts are
//! deferred until the host reports usable bounds.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The roster filter matched nobody.
    #[error("no participants available for this round")]
    NoParticipants,

    /// Only one participant and the degenerate-round policy rejects it.
    #[error("a round needs at least two participants, {available} available")]
    NotEnoughParticipants { available: usize },

    /// A champion has been crowned; reset before starting another round.
    #[error("match is over, reset to start a new one")]
    MatchOver,

    /// Settings contain values that cannot be clamped into range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings or ranking JSON could not be (de)serialized.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
