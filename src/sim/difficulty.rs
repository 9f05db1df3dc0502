//! Level difficulty curve

use serde::{Deserialize, Serialize};

/// Level at which every parameter reaches its final value
const MAX_SCALED_LEVEL: u32 = 10;

/// Level-dependent speeds (pixels/tick) and timers (ticks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub player_speed: f32,
    pub ghost_speed: f32,
    pub frightened_speed: f32,
    pub frightened_ticks: u32,
    pub eaten_speed: f32,
}

impl Difficulty {
    /// Parameters for a level, interpolated between level 1 and level 10.
    /// Levels outside that range saturate.
    pub fn for_level(level: u32) -> Self {
        let t = (level.saturating_sub(1) as f32 / (MAX_SCALED_LEVEL - 1) as f32).clamp(0.0, 1.0);
        Self {
            player_speed: lerp(1.5, 1.8, t),
            ghost_speed: lerp(1.3, 1.8, t),
            frightened_speed: 0.8,
            frightened_ticks: lerp(360.0, 60.0, t) as u32,
            eaten_speed: 3.0,
        }
    }
}

/// Endpoint-exact interpolation: t = 0 gives `a`, t = 1 gives `b`
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
