//! Run settings and modifiers
//!
//! Everything the menus decide before a run starts. The simulation reads
//! these once at run start and never writes them back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Run variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Finite lives, respawn resets altitude to zero, coins every 200 m
    #[default]
    Standard,
    /// Unlimited lives, respawn at the last checkpoint
    EndlessProgress,
    /// Authored level, finite lives, no recycling
    Custom,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "Standard",
            GameMode::EndlessProgress => "Endless",
            GameMode::Custom => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "classic" => Some(GameMode::Standard),
            "endless" | "rush" => Some(GameMode::EndlessProgress),
            "custom" => Some(GameMode::Custom),
            _ => None,
        }
    }

    /// Whether the field is procedurally generated and recycled
    pub fn is_endless(&self) -> bool {
        !matches!(self, GameMode::Custom)
    }

    /// Coin cadence in meters, if this mode pays coins at all
    pub fn coin_interval(&self) -> Option<f64> {
        match self {
            GameMode::Standard => Some(STANDARD_COIN_INTERVAL),
            GameMode::EndlessProgress => Some(ENDLESS_COIN_INTERVAL),
            GameMode::Custom => None,
        }
    }
}

/// Multipliers bought in the shop or granted by boosts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunModifiers {
    /// Scales the jump impulse
    pub jump: f32,
    /// Scales gravity while airborne
    pub gravity: f32,
    /// Scales meters gained per pixel climbed
    pub score: f64,
    /// Each coin is worth two credits
    pub double_credits: bool,
}

impl Default for RunModifiers {
    fn default() -> Self {
        Self {
            jump: 1.0,
            gravity: 1.0,
            score: 1.0,
            double_credits: false,
        }
    }
}

impl RunModifiers {
    /// Credits granted per coin event
    pub fn coin_value(&self) -> u32 {
        if self.double_credits { 2 } else { 1 }
    }
}

/// Settings for a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub mode: GameMode,
    pub modifiers: RunModifiers,
    /// Meters between checkpoints (endless mode)
    pub checkpoint_interval: f64,
    /// Lives at run start (ignored in endless mode, which is unlimited)
    pub starting_lives: u32,
    /// Stored checkpoint to resume from (endless mode)
    pub resume_checkpoint: f64,
    /// Player skin color (0xRRGGBB)
    pub player_color: u32,
    /// Seed for the platform field and hazards
    pub seed: u64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Standard,
            modifiers: RunModifiers::default(),
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            starting_lives: 1,
            resume_checkpoint: 0.0,
            player_color: DEFAULT_PLAYER_COLOR,
            seed: 0,
        }
    }
}

/// Settings could not be read
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed run settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RunSettings {
    /// Create settings for a mode (other values default)
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse settings from JSON and sanitize them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into the ranges the simulation relies on
    pub fn sanitized(mut self) -> Self {
        if !(self.checkpoint_interval.is_finite() && self.checkpoint_interval >= 1.0) {
            log::warn!(
                "Checkpoint interval {} out of range, using {}",
                self.checkpoint_interval,
                DEFAULT_CHECKPOINT_INTERVAL
            );
            self.checkpoint_interval = DEFAULT_CHECKPOINT_INTERVAL;
        }
        if !(self.resume_checkpoint.is_finite() && self.resume_checkpoint >= 0.0) {
            log::warn!("Resume checkpoint {} invalid, starting at 0", self.resume_checkpoint);
            self.resume_checkpoint = 0.0;
        }
        if self.starting_lives == 0 {
            log::warn!("Run started with no lives, granting one");
            self.starting_lives = 1;
        }

        let m = &mut self.modifiers;
        if !(m.jump.is_finite() && m.jump > 0.0) {
            log::warn!("Jump multiplier {} invalid, using 1.0", m.jump);
            m.jump = 1.0;
        }
        if !(m.gravity.is_finite() && m.gravity > 0.0) {
            log::warn!("Gravity multiplier {} invalid, using 1.0", m.gravity);
            m.gravity = 1.0;
        }
        if !(m.score.is_finite() && m.score > 0.0) {
            log::warn!("Score multiplier {} invalid, using 1.0", m.score);
            m.score = 1.0;
        }
        self
    }

    /// Altitude the run (and every endless respawn) starts from
    pub fn starting_altitude(&self) -> f64 {
        match self.mode {
            GameMode::EndlessProgress => self.resume_checkpoint,
            _ => 0.0,
        }
    }
}
