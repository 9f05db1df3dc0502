//! Maze Chase - a tile-maze arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, ghost AI, session state)
//! - `config`: Session tuning loaded from JSON
//! - `audio`: Sound event sink interface

pub mod audio;
pub mod config;
pub mod sim;

pub use config::SessionConfig;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 8.0;
    /// Maze dimensions in tiles
    pub const MAZE_COLS: i32 = 28;
    pub const MAZE_ROWS: i32 = 31;
    /// Maze width in pixels (tunnel wrap boundary)
    pub const MAZE_PIXEL_WIDTH: f32 = MAZE_COLS as f32 * TILE_SIZE;

    /// Entities closer than this (pixels) collide
    pub const COLLISION_DISTANCE: f32 = 6.0;

    /// Player spawn tile
    pub const PLAYER_SPAWN: (i32, i32) = (14, 23);
    /// Tile just above the ghost door; house exit point and eaten-ghost target
    pub const HOUSE_ENTRANCE: (i32, i32) = (14, 11);
    /// Where an eaten ghost reappears inside the house
    pub const HOUSE_CENTER: (i32, i32) = (14, 14);

    /// Scoring
    pub const DOT_SCORE: u64 = 10;
    pub const POWER_PELLET_SCORE: u64 = 50;
    pub const GHOST_EAT_BASE_SCORE: u64 = 200;

    /// Animation frame period while moving (ticks)
    pub const ANIM_PERIOD_TICKS: u32 = 4;
}

/// Pixel position of the center of a tile
#[inline]
pub fn tile_center(tile: IVec2) -> Vec2 {
    let half = consts::TILE_SIZE / 2.0;
    Vec2::new(
        tile.x as f32 * consts::TILE_SIZE + half,
        tile.y as f32 * consts::TILE_SIZE + half,
    )
}

/// Tile containing a pixel position
#[inline]
pub fn tile_of(pos: Vec2) -> IVec2 {
    (pos / consts::TILE_SIZE).floor().as_ivec2()
}

/// Wrap an x coordinate back into the maze's horizontal extent
#[inline]
pub fn wrap_x(x: f32) -> f32 {
    if x < 0.0 {
        x + consts::MAZE_PIXEL_WIDTH
    } else if x >= consts::MAZE_PIXEL_WIDTH {
        x - consts::MAZE_PIXEL_WIDTH
    } else {
        x
    }
}
