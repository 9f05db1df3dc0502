//! Ghost entities and their per-role constants

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::movement::Direction;
use crate::consts::HOUSE_ENTRANCE;
use crate::{tile_center, tile_of};

/// The four ghost roles, in collision-check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostId {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [
        GhostId::Blinky,
        GhostId::Pinky,
        GhostId::Inky,
        GhostId::Clyde,
    ];

    /// Position in `Session::ghosts`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tile the ghost starts each life on
    pub const fn spawn_tile(self) -> IVec2 {
        match self {
            GhostId::Blinky => IVec2::new(HOUSE_ENTRANCE.0, HOUSE_ENTRANCE.1),
            GhostId::Pinky => IVec2::new(12, 14),
            GhostId::Inky => IVec2::new(14, 14),
            GhostId::Clyde => IVec2::new(16, 14),
        }
    }

    /// Corner targeted while scattering
    pub const fn scatter_corner(self) -> IVec2 {
        match self {
            GhostId::Blinky => IVec2::new(25, 0),
            GhostId::Pinky => IVec2::new(2, 0),
            GhostId::Inky => IVec2::new(27, 30),
            GhostId::Clyde => IVec2::new(0, 30),
        }
    }

    /// Ticks spent in the house before walking out
    pub const fn exit_delay(self) -> u32 {
        match self {
            GhostId::Blinky | GhostId::Pinky => 0,
            GhostId::Inky => 300,
            GhostId::Clyde => 600,
        }
    }

    pub const fn starts_in_house(self) -> bool {
        !matches!(self, GhostId::Blinky)
    }

    const fn initial_dir(self) -> Direction {
        match self {
            GhostId::Blinky => Direction::Left,
            GhostId::Pinky => Direction::Down,
            GhostId::Inky | GhostId::Clyde => Direction::Up,
        }
    }
}

/// Ghost behaviour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostMode {
    Chase,
    Scatter,
    /// Vulnerable after a power pellet; wanders randomly
    Frightened,
    /// Caught while frightened; heading home
    Eaten,
}

/// A ghost entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub id: GhostId,
    /// Pixel position (center of sprite)
    pub pos: Vec2,
    pub dir: Direction,
    /// Pixels per tick
    pub speed: f32,
    /// Personal mode; Chase/Scatter defer to the global mode timer
    pub mode: GhostMode,
    /// Confined to the house
    pub in_house: bool,
    /// Ticks left before a confined ghost starts walking out
    pub exit_delay: u32,
    /// Tile center already handled while heading in that direction
    pub(crate) last_center: Option<(IVec2, Direction)>,
}

impl Ghost {
    /// A fresh ghost at its spawn tile
    pub fn new(id: GhostId, speed: f32) -> Self {
        Self {
            id,
            pos: tile_center(id.spawn_tile()),
            dir: id.initial_dir(),
            speed,
            mode: GhostMode::Scatter,
            in_house: id.starts_in_house(),
            exit_delay: id.exit_delay(),
            last_center: None,
        }
    }

    /// All four ghosts in `GhostId` order
    pub fn roster(speed: f32) -> [Ghost; 4] {
        GhostId::ALL.map(|id| Ghost::new(id, speed))
    }

    pub fn tile(&self) -> IVec2 {
        tile_of(self.pos)
    }

    pub fn scatter_corner(&self) -> IVec2 {
        self.id.scatter_corner()
    }

    pub fn spawn_tile(&self) -> IVec2 {
        self.id.spawn_tile()
    }

    /// Out of the house and not heading home
    pub fn is_free(&self) -> bool {
        !self.in_house && self.mode != GhostMode::Eaten
    }
}
