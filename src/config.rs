//! Session configuration
//!
//! Countdown lengths, starting lives and the RNG seed. Hosts may load it from
//! JSON; any missing field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;

/// Tunables for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for ghost randomness (frightened wandering, chase jitter)
    pub seed: u64,
    /// Lives at the start of a game
    pub starting_lives: u8,

    // === Phase countdowns (ticks) ===
    /// "Ready!" pause before play starts
    pub ready_ticks: u32,
    /// Death animation before respawn or game over
    pub death_ticks: u32,
    /// Wall flash after the last dot
    pub level_clear_ticks: u32,
    /// Game over screen before returning to the title
    pub game_over_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            starting_lives: 3,

            ready_ticks: 2 * TICK_RATE,
            death_ticks: TICK_RATE * 3 / 2,
            level_clear_ticks: 2 * TICK_RATE,
            game_over_ticks: 3 * TICK_RATE,
        }
    }
}

impl SessionConfig {
    /// Default config with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
