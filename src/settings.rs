//! Match settings
//!
//! Every gameplay tunable the host can expose. Values are read by the engine
//! each frame, so changes take effect on the next step.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How a collision between two live entities is resolved during play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EliminationPolicy {
    /// Collisions only push entities apart; the gap is the only way out
    #[default]
    GapExitOnly,
    /// A colliding pair loses one randomly chosen side
    CollisionCoinFlip,
}

impl EliminationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EliminationPolicy::GapExitOnly => "gap-exit",
            EliminationPolicy::CollisionCoinFlip => "coin-flip",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gap-exit" | "gap" => Some(EliminationPolicy::GapExitOnly),
            "coin-flip" | "collision" => Some(EliminationPolicy::CollisionCoinFlip),
            _ => None,
        }
    }
}

/// What to do when a round would start with a single participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DegenerateRoundPolicy {
    /// Refuse to start the round
    #[default]
    Reject,
    /// Spawn the lone participant and award it the round at once
    TrivialWin,
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Radius lost per frame while playing (scaled by game speed)
    pub shrink_rate: f32,
    /// Arena never shrinks below this radius
    pub min_arena_radius: f32,
    /// Gap width as a fraction of the full circle (0.0 - 1.0)
    pub gap_size: f32,
    /// Gap rotation in radians per frame (scaled by game speed)
    pub rotation_speed: f32,

    // === Entities ===
    /// Entity radius
    pub flag_size: f32,
    /// Global speed multiplier
    pub game_speed: f32,
    /// Random jitter applied while spawning
    pub vibration_strength: f32,
    /// Impulse applied to both sides of a collision
    pub collision_force: f32,
    /// Upper bound on entities spawned per round
    pub max_participants: usize,

    // === Match flow ===
    /// Round wins needed to become champion
    pub points_to_win: u32,
    /// Start the next round automatically after a countdown
    pub auto_restart: bool,
    /// Duration of the spawning phase (seconds)
    pub spawn_delay_secs: f32,
    pub elimination_policy: EliminationPolicy,
    pub degenerate_round: DegenerateRoundPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shrink_rate: 0.08,
            min_arena_radius: 100.0,
            gap_size: 0.15,
            rotation_speed: 0.01,

            flag_size: 18.75,
            game_speed: 1.0,
            vibration_strength: 2.0,
            collision_force: 15.0,
            max_participants: 120,

            points_to_win: 5,
            auto_restart: true,
            spawn_delay_secs: 2.5,
            elimination_policy: EliminationPolicy::GapExitOnly,
            degenerate_round: DegenerateRoundPolicy::Reject,
        }
    }
}

impl Settings {
    pub fn with_points_to_win(mut self, points: u32) -> Self {
        self.points_to_win = points;
        self
    }

    pub fn with_auto_restart(mut self, enabled: bool) -> Self {
        self.auto_restart = enabled;
        self
    }

    pub fn with_game_speed(mut self, speed: f32) -> Self {
        self.game_speed = speed;
        self
    }

    pub fn with_gap_size(mut self, fraction: f32) -> Self {
        self.gap_size = fraction;
        self
    }

    pub fn with_elimination_policy(mut self, policy: EliminationPolicy) -> Self {
        self.elimination_policy = policy;
        self
    }

    pub fn with_degenerate_round(mut self, policy: DegenerateRoundPolicy) -> Self {
        self.degenerate_round = policy;
        self
    }

    /// Clamp every value into its usable range.
    ///
    /// Non-finite numbers cannot be repaired and are rejected.
    pub fn validated(mut self) -> EngineResult<Self> {
        let floats = [
            ("shrink_rate", self.shrink_rate),
            ("min_arena_radius", self.min_arena_radius),
            ("gap_size", self.gap_size),
            ("rotation_speed", self.rotation_speed),
            ("flag_size", self.flag_size),
            ("game_speed", self.game_speed),
            ("vibration_strength", self.vibration_strength),
            ("collision_force", self.collision_force),
            ("spawn_delay_secs", self.spawn_delay_secs),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::InvalidSettings(format!("{name} is not finite")));
        }

        let before = self.clone();
        self.shrink_rate = self.shrink_rate.max(0.0);
        self.min_arena_radius = self.min_arena_radius.max(0.0);
        self.gap_size = self.gap_size.clamp(0.0, 1.0);
        self.flag_size = self.flag_size.max(1.0);
        self.game_speed = self.game_speed.max(0.0);
        self.vibration_strength = self.vibration_strength.max(0.0);
        self.collision_force = self.collision_force.max(0.0);
        self.spawn_delay_secs = self.spawn_delay_secs.max(0.0);
        self.points_to_win = self.points_to_win.max(1);
        self.max_participants = self.max_participants.max(1);

        if self != before {
            log::warn!("Settings clamped into range: {:?}", self);
        }
        Ok(self)
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validated()
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
