//! Ghost decision making
//!
//! A shared scatter/chase schedule plus per-ghost target selection. Decisions
//! happen only at tile centers; between centers a ghost keeps sliding.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::ghost::{Ghost, GhostMode};
use super::maze::Maze;
use super::movement::{Direction, advance, is_at_tile_center};
use crate::consts::{HOUSE_CENTER, HOUSE_ENTRANCE};
use crate::tile_center;

/// Largest per-axis offset added to the player's tile when chasing
const CHASE_JITTER: i32 = 2;

/// One step of the scatter/chase schedule; `ticks: None` lasts forever
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ModePhase {
    mode: GhostMode,
    ticks: Option<u32>,
}

/// Global scatter/chase cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeTimer {
    phases: Vec<ModePhase>,
    current: usize,
    ticks_in_phase: u32,
}

impl ModeTimer {
    /// Schedule for a level. Scatter phases shrink by 7% per level, floored at 40%.
    pub fn new(level: u32) -> Self {
        let scale = if level > 1 {
            (1.0 - f64::from(level - 1) * 0.07).max(0.4)
        } else {
            1.0
        };
        let scatter = |ticks: u32| ModePhase {
            mode: GhostMode::Scatter,
            ticks: Some((f64::from(ticks) * scale) as u32),
        };
        let chase = |ticks: Option<u32>| ModePhase {
            mode: GhostMode::Chase,
            ticks,
        };

        Self {
            phases: vec![
                scatter(420),
                chase(Some(1200)),
                scatter(420),
                chase(Some(1200)),
                scatter(300),
                chase(None),
            ],
            current: 0,
            ticks_in_phase: 0,
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        let Some(phase) = self.phases.get(self.current) else {
            return;
        };
        let Some(ticks) = phase.ticks else {
            return;
        };
        self.ticks_in_phase += 1;
        if self.ticks_in_phase >= ticks {
            self.current += 1;
            self.ticks_in_phase = 0;
        }
    }

    /// Mode that free Chase/Scatter ghosts follow right now
    pub fn current_mode(&self) -> GhostMode {
        self.phases
            .get(self.current)
            .map_or(GhostMode::Chase, |phase| phase.mode)
    }

    /// Restart from the first phase
    pub fn reset(&mut self) {
        self.current = 0;
        self.ticks_in_phase = 0;
    }
}

/// Greedy step toward `target`.
///
/// Never reverses `heading` and never enters a wall. Candidates are scanned
/// Up, Left, Down, Right and only a strictly closer one replaces the best, so
/// ties go to the earlier direction. Returns `None` if every way is blocked.
pub fn choose_direction(maze: &Maze, tile: IVec2, heading: Direction, target: IVec2) -> Direction {
    let reverse = heading.reverse();
    let mut best = Direction::None;
    let mut best_dist = i32::MAX;

    for dir in Direction::PRIORITY {
        if dir == reverse {
            continue;
        }
        let next = maze.neighbor(tile, dir);
        if !maze.is_passable_for_ghost(next.x, next.y) {
            continue;
        }
        let dist = (next - target).length_squared();
        if dist < best_dist {
            best_dist = dist;
            best = dir;
        }
    }
    best
}

/// Uniformly random open, non-reversing direction
pub fn choose_random_direction<R: Rng + ?Sized>(
    maze: &Maze,
    tile: IVec2,
    heading: Direction,
    rng: &mut R,
) -> Direction {
    let reverse = heading.reverse();
    let valid: Vec<Direction> = Direction::PRIORITY
        .into_iter()
        .filter(|&dir| dir != reverse)
        .filter(|&dir| {
            let next = maze.neighbor(tile, dir);
            maze.is_passable_for_ghost(next.x, next.y)
        })
        .collect();

    if valid.is_empty() {
        Direction::None
    } else {
        valid[rng.random_range(0..valid.len())]
    }
}

/// Advance one ghost by one tick: house exit, decision at centers, then movement
pub fn update_ghost<R: Rng + ?Sized>(
    ghost: &mut Ghost,
    maze: &Maze,
    player_tile: IVec2,
    global_mode: GhostMode,
    difficulty: &Difficulty,
    rng: &mut R,
) {
    if ghost.in_house {
        walk_out_of_house(ghost);
        return;
    }

    let mode = match ghost.mode {
        GhostMode::Frightened | GhostMode::Eaten => ghost.mode,
        GhostMode::Chase | GhostMode::Scatter => global_mode,
    };

    let tile = ghost.tile();
    let already_handled =
        ghost.dir != Direction::None && ghost.last_center == Some((tile, ghost.dir));

    if is_at_tile_center(ghost.pos, ghost.speed) && !already_handled {
        ghost.pos = tile_center(tile);

        let entrance = IVec2::from(HOUSE_ENTRANCE);
        if mode == GhostMode::Eaten && tile == entrance {
            reenter_house(ghost, difficulty);
            return;
        }

        ghost.dir = match mode {
            GhostMode::Chase => {
                let jitter = IVec2::new(
                    rng.random_range(-CHASE_JITTER..=CHASE_JITTER),
                    rng.random_range(-CHASE_JITTER..=CHASE_JITTER),
                );
                choose_direction(maze, tile, ghost.dir, player_tile + jitter)
            }
            GhostMode::Scatter => choose_direction(maze, tile, ghost.dir, ghost.scatter_corner()),
            GhostMode::Frightened => choose_random_direction(maze, tile, ghost.dir, rng),
            GhostMode::Eaten => choose_direction(maze, tile, ghost.dir, entrance),
        };
        ghost.last_center = Some((tile, ghost.dir));
    }

    ghost.pos = advance(ghost.pos, ghost.dir, ghost.speed);
}

/// Count down the exit delay, then walk straight to the entrance tile
fn walk_out_of_house(ghost: &mut Ghost) {
    if ghost.exit_delay > 0 {
        ghost.exit_delay -= 1;
        return;
    }

    let exit = tile_center(IVec2::from(HOUSE_ENTRANCE));
    let to_exit = exit - ghost.pos;
    let dist = to_exit.length();
    if dist < ghost.speed {
        ghost.pos = exit;
        ghost.in_house = false;
        ghost.dir = Direction::Left;
        ghost.last_center = None;
    } else {
        ghost.pos += to_exit / dist * ghost.speed;
    }
}

/// Eaten ghost reached home: confine it and let it straight back out
fn reenter_house(ghost: &mut Ghost, difficulty: &Difficulty) {
    ghost.in_house = true;
    ghost.exit_delay = 0;
    ghost.mode = GhostMode::Scatter;
    ghost.speed = difficulty.ghost_speed;
    ghost.pos = tile_center(IVec2::from(HOUSE_CENTER));
    ghost.dir = Direction::Up;
    ghost.last_center = None;
    log::debug!("{:?} back in the house", ghost.id);
}
