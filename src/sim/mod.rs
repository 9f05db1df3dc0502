//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (ghosts by `GhostId`)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod difficulty;
pub mod ghost;
pub mod maze;
pub mod movement;
pub mod path;
pub mod state;
pub mod tick;

pub use ai::{ModeTimer, choose_direction, choose_random_direction, update_ghost};
pub use difficulty::Difficulty;
pub use ghost::{Ghost, GhostId, GhostMode};
pub use maze::{Maze, Tile};
pub use movement::{Direction, Player, collides, is_at_tile_center};
pub use path::find_path;
pub use state::{GameEvent, GamePhase, Session, Snapshot, TransitionError, is_valid_transition};
pub use tick::{TickInput, check_consumption, ghost_eat_score, tick};
