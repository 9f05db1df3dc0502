//! Session state and lifecycle
//!
//! The `Session` is the aggregate root. Phase changes go through a closed
//! transition table; players, ghosts and the mode timer are rebuilt wholesale
//! whenever a life or level starts.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::ModeTimer;
use super::difficulty::Difficulty;
use super::ghost::{Ghost, GhostId, GhostMode};
use super::maze::Maze;
use super::movement::Player;
use crate::config::SessionConfig;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start signal
    Title,
    /// Countdown before play
    Ready,
    /// Active gameplay
    Playing,
    /// Player caught; countdown to respawn or game over
    Death,
    /// Board cleared; countdown to the next level
    LevelClear,
    /// Out of lives; countdown back to the title
    GameOver,
}

impl GamePhase {
    pub const ALL: [GamePhase; 6] = [
        GamePhase::Title,
        GamePhase::Ready,
        GamePhase::Playing,
        GamePhase::Death,
        GamePhase::LevelClear,
        GamePhase::GameOver,
    ];
}

/// Whether the lifecycle allows moving from `from` to `to`
pub const fn is_valid_transition(from: GamePhase, to: GamePhase) -> bool {
    use GamePhase::*;
    match (from, to) {
        (Title, Ready)
        | (Ready, Playing)
        | (Playing, Death)
        | (Playing, LevelClear)
        | (Death, Playing)
        | (Death, GameOver)
        | (LevelClear, Ready)
        | (GameOver, Title) => true,
        (Title, _)
        | (Ready, _)
        | (Playing, _)
        | (Death, _)
        | (LevelClear, _)
        | (GameOver, _) => false,
    }
}

/// An edge missing from the lifecycle table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: GamePhase,
    pub to: GamePhase,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal phase transition {:?} -> {:?}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}

/// Notifications for the audio (or any other) collaborator.
/// Exactly one is emitted per qualifying change, on the tick it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DotEaten,
    PowerPelletEaten,
    GhostEaten { ghost: GhostId, points: u64 },
    PlayerDeath,
    LevelClear,
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    /// Countdown of the current phase (drives the level-clear wall flash)
    pub phase_ticks: u32,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u32,
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub ghosts: &'a [Ghost; 4],
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    pub maze: Maze,
    pub player: Player,
    /// Indexed by `GhostId::index`
    pub ghosts: [Ghost; 4],
    pub mode_timer: ModeTimer,
    /// Parameters for the current level
    pub difficulty: Difficulty,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    /// 1-based
    pub level: u32,
    /// Ghosts eaten since the last power pellet
    pub combo: u32,
    /// Ticks of frightened mode left (0 = none active)
    pub frightened_ticks: u32,
    /// Countdown for timed phases
    pub phase_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    phase: GamePhase,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// New session on the title screen, seeded from the config
    pub fn new(config: SessionConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// New session with an explicit random source
    pub fn with_rng(config: SessionConfig, rng: Pcg32) -> Self {
        let difficulty = Difficulty::for_level(1);
        Self {
            lives: config.starting_lives,
            config,
            maze: Maze::new(),
            player: Player::new(difficulty.player_speed),
            ghosts: Ghost::roster(difficulty.ghost_speed),
            mode_timer: ModeTimer::new(1),
            difficulty,
            score: 0,
            high_score: 0,
            level: 1,
            combo: 0,
            frightened_ticks: 0,
            phase_ticks: 0,
            time_ticks: 0,
            phase: GamePhase::Title,
            events: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Events emitted during the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            phase_ticks: self.phase_ticks,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            level: self.level,
            maze: &self.maze,
            player: &self.player,
            ghosts: &self.ghosts,
        }
    }

    /// Move to `next` if the lifecycle table allows it, loading its countdown
    pub fn try_transition(&mut self, next: GamePhase) -> Result<(), TransitionError> {
        if !is_valid_transition(self.phase, next) {
            return Err(TransitionError {
                from: self.phase,
                to: next,
            });
        }
        log::info!("Phase {:?} -> {:?} (level {})", self.phase, next, self.level);
        self.phase = next;
        self.phase_ticks = self.countdown_for(next);
        Ok(())
    }

    /// Internal transitions are always table edges; a miss is a logic bug
    pub(crate) fn enter(&mut self, next: GamePhase) {
        let result = self.try_transition(next);
        debug_assert!(result.is_ok(), "{result:?}");
        if let Err(err) = result {
            log::error!("{err}");
        }
    }

    fn countdown_for(&self, phase: GamePhase) -> u32 {
        match phase {
            GamePhase::Ready => self.config.ready_ticks,
            GamePhase::Death => self.config.death_ticks,
            GamePhase::LevelClear => self.config.level_clear_ticks,
            GamePhase::GameOver => self.config.game_over_ticks,
            GamePhase::Title | GamePhase::Playing => 0,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Fresh game from level 1: score, lives, board and entities
    pub(crate) fn reset_game(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.maze.reset();
        self.spawn_entities();
    }

    /// Rebuild player, ghosts and mode timer for the current level
    pub(crate) fn spawn_entities(&mut self) {
        self.difficulty = Difficulty::for_level(self.level);
        self.player = Player::new(self.difficulty.player_speed);
        self.ghosts = Ghost::roster(self.difficulty.ghost_speed);
        self.mode_timer = ModeTimer::new(self.level);
        self.combo = 0;
        self.frightened_ticks = 0;
    }

    /// Power pellet: every free ghost turns around and becomes vulnerable
    pub(crate) fn start_frightened(&mut self) {
        self.combo = 0;
        self.frightened_ticks = self.difficulty.frightened_ticks;
        let speed = self.difficulty.frightened_speed;
        for ghost in self.ghosts.iter_mut().filter(|g| g.is_free()) {
            ghost.mode = GhostMode::Frightened;
            ghost.dir = ghost.dir.reverse();
            ghost.speed = speed;
        }
    }

    /// Frightened window over: survivors go back to chasing
    pub(crate) fn end_frightened(&mut self) {
        let speed = self.difficulty.ghost_speed;
        for ghost in self
            .ghosts
            .iter_mut()
            .filter(|g| g.mode == GhostMode::Frightened)
        {
            ghost.mode = GhostMode::Chase;
            ghost.speed = speed;
        }
    }
}
