//! Grid movement and proximity collision
//!
//! Entities slide in straight lines between tile centers. Turns are only
//! evaluated at a center, which is detected when the entity is closer to it
//! than one tick of travel.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use crate::consts::*;
use crate::{tile_center, tile_of, wrap_x};

/// Movement direction. `None` means standing still (or no queued turn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Evaluation order for ghost decisions and pathfinding; earlier wins ties
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Tile offset (y grows downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::None => IVec2::ZERO,
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    /// Unit pixel-space vector
    pub fn vector(self) -> Vec2 {
        self.offset().as_vec2()
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Whether `pos` is within one tick of travel of its tile's center
#[inline]
pub fn is_at_tile_center(pos: Vec2, speed: f32) -> bool {
    pos.distance(tile_center(tile_of(pos))) < speed
}

/// Slide `pos` along `dir`, wrapping through the side tunnels
#[inline]
pub fn advance(pos: Vec2, dir: Direction, speed: f32) -> Vec2 {
    let moved = pos + dir.vector() * speed;
    Vec2::new(wrap_x(moved.x), moved.y)
}

/// Proximity collision between two entity centers (strictly closer than the threshold)
#[inline]
pub fn collides(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < COLLISION_DISTANCE
}

/// Mouth animation frames, stepped every `ANIM_PERIOD_TICKS` while moving
const ANIM_SEQUENCE: [u8; 4] = [0, 1, 2, 1];

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Pixel position (center of sprite)
    pub pos: Vec2,
    pub dir: Direction,
    /// Turn queued from input, applied at the next center where it is open
    pub next_dir: Direction,
    /// Pixels per tick
    pub speed: f32,
    pub alive: bool,
    /// Current animation frame (0 closed, 1 half, 2 open)
    pub anim_frame: u8,
    anim_step: u8,
    anim_ticks: u32,
    /// Tile center already handled while heading in that direction
    last_center: Option<(IVec2, Direction)>,
}

impl Player {
    /// A fresh player at the spawn tile
    pub fn new(speed: f32) -> Self {
        Self::at_tile(IVec2::from(PLAYER_SPAWN), speed)
    }

    /// A fresh, stationary player centered on `tile`
    pub fn at_tile(tile: IVec2, speed: f32) -> Self {
        Self {
            pos: tile_center(tile),
            dir: Direction::None,
            next_dir: Direction::None,
            speed,
            alive: true,
            anim_frame: 0,
            anim_step: 0,
            anim_ticks: 0,
            last_center: None,
        }
    }

    pub fn tile(&self) -> IVec2 {
        tile_of(self.pos)
    }

    pub fn is_at_tile_center(&self) -> bool {
        is_at_tile_center(self.pos, self.speed)
    }

    /// Advance one tick: take queued turns at centers, stop at walls, slide, wrap
    pub fn move_step(&mut self, maze: &Maze) {
        let tile = self.tile();
        let already_handled =
            self.dir != Direction::None && self.last_center == Some((tile, self.dir));

        if self.is_at_tile_center() && !already_handled {
            self.pos = tile_center(tile);

            if self.next_dir != Direction::None {
                let turn = maze.neighbor(tile, self.next_dir);
                if maze.is_passable(turn.x, turn.y) {
                    self.dir = self.next_dir;
                    self.next_dir = Direction::None;
                }
            }

            if self.dir != Direction::None {
                let ahead = maze.neighbor(tile, self.dir);
                if !maze.is_passable(ahead.x, ahead.y) {
                    self.dir = Direction::None;
                }
            }

            self.last_center = Some((tile, self.dir));
        }

        self.pos = advance(self.pos, self.dir, self.speed);

        if self.dir != Direction::None {
            self.anim_ticks += 1;
            if self.anim_ticks >= ANIM_PERIOD_TICKS {
                self.anim_ticks = 0;
                self.anim_step = (self.anim_step + 1) % ANIM_SEQUENCE.len() as u8;
                self.anim_frame = ANIM_SEQUENCE[self.anim_step as usize];
            }
        }
    }
}
