//! Maze tile grid
//!
//! The layout is a compiled-in constant. Parsing it is also how the maze is
//! reset, so there is no separate "restore" copy of the grid.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::movement::Direction;
use crate::consts::{MAZE_COLS, MAZE_ROWS};

/// A single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Dot,
    PowerPellet,
    Empty,
    GhostHouse,
    GhostDoor,
}

impl Tile {
    fn from_char(ch: u8) -> Self {
        match ch {
            b'#' => Tile::Wall,
            b'.' => Tile::Dot,
            b'o' => Tile::PowerPellet,
            b'-' => Tile::GhostDoor,
            b'G' => Tile::GhostHouse,
            _ => Tile::Empty,
        }
    }

    /// Dots and power pellets
    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Dot | Tile::PowerPellet)
    }
}

/// Reference layout, 28 columns by 31 rows.
/// `#` wall, `.` dot, `o` power pellet, `-` ghost door, `G` ghost house, ` ` empty
const LAYOUT: [&str; MAZE_ROWS as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###--### ##.#     ",
    "######.## #GGGGGG# ##.######",
    "      .   #GGGGGG#   .      ",
    "######.## #GGGGGG# ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// The maze grid plus a live count of uneaten collectibles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    /// Row-major tiles
    tiles: Vec<Tile>,
    remaining: u32,
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Maze {
    pub fn new() -> Self {
        let mut maze = Self {
            tiles: Vec::with_capacity((MAZE_COLS * MAZE_ROWS) as usize),
            remaining: 0,
        };
        maze.parse();
        maze
    }

    /// Rebuild the grid and collectible count from the layout in one pass
    fn parse(&mut self) {
        self.tiles.clear();
        self.remaining = 0;
        for row in LAYOUT {
            let bytes = row.as_bytes();
            for x in 0..MAZE_COLS as usize {
                // Short rows pad with empty space
                let tile = Tile::from_char(bytes.get(x).copied().unwrap_or(b' '));
                if tile.is_collectible() {
                    self.remaining += 1;
                }
                self.tiles.push(tile);
            }
        }
    }

    /// Restore every dot and power pellet
    pub fn reset(&mut self) {
        self.parse();
    }

    pub fn width(&self) -> i32 {
        MAZE_COLS
    }

    pub fn height(&self) -> i32 {
        MAZE_ROWS
    }

    /// Row-major tile slice for renderers
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= MAZE_COLS || y < 0 || y >= MAZE_ROWS {
            None
        } else {
            Some((y * MAZE_COLS + x) as usize)
        }
    }

    /// Tile at a grid position; anything outside the grid is a wall
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        Self::index(x, y).map_or(Tile::Wall, |i| self.tiles[i])
    }

    /// Whether the player may enter the tile
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        matches!(
            self.tile_at(x, y),
            Tile::Dot | Tile::PowerPellet | Tile::Empty
        )
    }

    /// Whether a ghost may enter the tile (house and door included)
    pub fn is_passable_for_ghost(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y) != Tile::Wall
    }

    /// Eat the collectible at a position.
    ///
    /// Returns the tile that was eaten, or `None` if there was nothing to eat.
    /// Calling it again on the same cell is a no-op.
    pub fn consume(&mut self, x: i32, y: i32) -> Option<Tile> {
        let i = Self::index(x, y)?;
        let tile = self.tiles[i];
        if !tile.is_collectible() {
            return None;
        }
        self.tiles[i] = Tile::Empty;
        self.remaining -= 1;
        Some(tile)
    }

    /// Dots and power pellets still on the board
    pub fn remaining_collectibles(&self) -> u32 {
        self.remaining
    }

    /// The tile one step away in `dir`, wrapping columns so tunnels connect
    pub fn neighbor(&self, tile: IVec2, dir: Direction) -> IVec2 {
        let next = tile + dir.offset();
        IVec2::new(next.x.rem_euclid(MAZE_COLS), next.y)
    }
}
