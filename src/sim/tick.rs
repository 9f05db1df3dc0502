//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Within a
//! playing tick the order is fixed: input, player move, consumption,
//! frightened timer, mode timer, ghosts, collisions, phase change.

use super::ai::update_ghost;
use super::ghost::GhostMode;
use super::maze::Tile;
use super::movement::{Direction, collides};
use super::state::{GameEvent, GamePhase, Session};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn to queue for the player (`None` leaves the queue alone)
    pub direction: Direction,
    /// Start a game from the title screen
    pub start: bool,
}

/// Points for eating a ghost: 200, 400, 800, 1600, ...
pub fn ghost_eat_score(combo: u32) -> u64 {
    GHOST_EAT_BASE_SCORE.saturating_mul(2u64.saturating_pow(combo))
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput) {
    session.clear_events();
    session.time_ticks += 1;

    match session.phase() {
        GamePhase::Title => {
            if input.start {
                session.reset_game();
                log::info!("Game started (seed {})", session.config.seed);
                session.enter(GamePhase::Ready);
            }
        }

        GamePhase::Ready => {
            if countdown_expired(session) {
                session.enter(GamePhase::Playing);
            }
        }

        GamePhase::Playing => tick_playing(session, input),

        GamePhase::Death => {
            if countdown_expired(session) {
                if session.lives == 0 {
                    session.high_score = session.high_score.max(session.score);
                    log::info!(
                        "Game over: score {} (high {})",
                        session.score,
                        session.high_score
                    );
                    session.enter(GamePhase::GameOver);
                } else {
                    session.spawn_entities();
                    session.enter(GamePhase::Playing);
                }
            }
        }

        GamePhase::LevelClear => {
            if countdown_expired(session) {
                session.level += 1;
                session.maze.reset();
                session.spawn_entities();
                log::info!("Level {} start", session.level);
                session.enter(GamePhase::Ready);
            }
        }

        GamePhase::GameOver => {
            if countdown_expired(session) {
                session.enter(GamePhase::Title);
            }
        }
    }
}

/// Decrement the phase countdown; true once it reaches zero
fn countdown_expired(session: &mut Session) -> bool {
    session.phase_ticks = session.phase_ticks.saturating_sub(1);
    session.phase_ticks == 0
}

fn tick_playing(session: &mut Session, input: &TickInput) {
    if input.direction != Direction::None {
        session.player.next_dir = input.direction;
    }
    session.player.move_step(&session.maze);

    check_consumption(session);

    if session.frightened_ticks > 0 {
        session.frightened_ticks -= 1;
        if session.frightened_ticks == 0 {
            session.end_frightened();
        }
    }

    session.mode_timer.tick();
    let global_mode = session.mode_timer.current_mode();
    let player_tile = session.player.tile();
    for ghost in session.ghosts.iter_mut() {
        update_ghost(
            ghost,
            &session.maze,
            player_tile,
            global_mode,
            &session.difficulty,
            &mut session.rng,
        );
    }

    if resolve_collisions(session) {
        return;
    }

    if session.maze.remaining_collectibles() == 0 {
        session.emit(GameEvent::LevelClear);
        session.enter(GamePhase::LevelClear);
    }
}

/// Eat whatever collectible is under the player
pub fn check_consumption(session: &mut Session) {
    let tile = session.player.tile();
    match session.maze.consume(tile.x, tile.y) {
        Some(Tile::Dot) => {
            session.score += DOT_SCORE;
            session.emit(GameEvent::DotEaten);
        }
        Some(Tile::PowerPellet) => {
            session.score += POWER_PELLET_SCORE;
            session.start_frightened();
            session.emit(GameEvent::PowerPelletEaten);
        }
        _ => {}
    }
}

/// Player against every free ghost, in roster order.
/// Returns true if the player died.
fn resolve_collisions(session: &mut Session) -> bool {
    let player_pos = session.player.pos;

    for i in 0..session.ghosts.len() {
        let ghost = &mut session.ghosts[i];
        if !ghost.is_free() || !collides(player_pos, ghost.pos) {
            continue;
        }

        if ghost.mode == GhostMode::Frightened {
            ghost.mode = GhostMode::Eaten;
            ghost.speed = session.difficulty.eaten_speed;
            let id = ghost.id;

            let points = ghost_eat_score(session.combo);
            session.score += points;
            session.combo += 1;
            log::debug!("{id:?} eaten for {points} (combo {})", session.combo);
            session.emit(GameEvent::GhostEaten { ghost: id, points });
        } else {
            log::debug!("Player caught by {:?}", ghost.id);
            kill_player(session);
            return true;
        }
    }
    false
}

fn kill_player(session: &mut Session) {
    session.player.alive = false;
    session.lives = session.lives.saturating_sub(1);
    session.emit(GameEvent::PlayerDeath);
    session.enter(GamePhase::Death);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::ghost::GhostId;
    use crate::tile_center;
    use glam::IVec2;

    /// Session that has been started and counted through "Ready"
    fn playing_session() -> Session {
        let mut session = Session::new(SessionConfig::default());
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &start);
        for _ in 0..session.config.ready_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Playing);
        session
    }

    fn place_player(session: &mut Session, x: i32, y: i32) {
        session.player.pos = tile_center(IVec2::new(x, y));
    }

    #[test]
    fn test_title_waits_for_start() {
        let mut session = Session::new(SessionConfig::default());
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Title);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &start);
        assert_eq!(session.phase(), GamePhase::Ready);
        assert_eq!(session.phase_ticks, session.config.ready_ticks);
    }

    #[test]
    fn test_ready_counts_down() {
        let mut session = Session::new(SessionConfig::default());
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &start);
        for _ in 1..session.config.ready_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Ready);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_dot_scoring() {
        let mut session = playing_session();
        let initial = session.maze.remaining_collectibles();
        place_player(&mut session, 1, 1);
        check_consumption(&mut session);
        assert_eq!(session.score, DOT_SCORE);
        assert_eq!(session.maze.remaining_collectibles(), initial - 1);
        assert_eq!(session.events(), &[GameEvent::DotEaten]);
    }

    #[test]
    fn test_no_duplicate_scoring() {
        let mut session = playing_session();
        place_player(&mut session, 1, 1);
        check_consumption(&mut session);
        check_consumption(&mut session);
        assert_eq!(session.score, 10);
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_power_pellet() {
        let mut session = playing_session();
        session.combo = 2;
        let before: Vec<_> = session.ghosts.iter().map(|g| (g.is_free(), g.dir)).collect();

        place_player(&mut session, 1, 3);
        check_consumption(&mut session);

        assert_eq!(session.score, POWER_PELLET_SCORE);
        assert_eq!(session.combo, 0);
        assert_eq!(session.frightened_ticks, session.difficulty.frightened_ticks);
        assert_eq!(session.events(), &[GameEvent::PowerPelletEaten]);
        for (ghost, (was_free, dir)) in session.ghosts.iter().zip(before) {
            if was_free {
                assert_eq!(ghost.mode, GhostMode::Frightened);
                assert_eq!(ghost.dir, dir.reverse());
            } else {
                assert_ne!(ghost.mode, GhostMode::Frightened);
            }
        }
        assert!(session.ghost(GhostId::Blinky).mode == GhostMode::Frightened);
    }

    #[test]
    fn test_ghost_eat_score() {
        assert_eq!(ghost_eat_score(0), 200);
        assert_eq!(ghost_eat_score(1), 400);
        assert_eq!(ghost_eat_score(2), 800);
        assert_eq!(ghost_eat_score(3), 1600);
        assert_eq!(ghost_eat_score(200), u64::MAX);
    }

    #[test]
    fn test_eating_frightened_ghosts_combos() {
        let mut session = playing_session();
        session.ghosts[GhostId::Pinky.index()].in_house = false;
        session.start_frightened();

        let pos = session.player.pos;
        session.ghosts[GhostId::Blinky.index()].pos = pos;
        session.ghosts[GhostId::Pinky.index()].pos = pos;

        assert!(!resolve_collisions(&mut session));
        assert_eq!(session.score, 200 + 400);
        assert_eq!(session.combo, 2);
        assert_eq!(session.ghost(GhostId::Blinky).mode, GhostMode::Eaten);
        assert_eq!(
            session.ghost(GhostId::Pinky).speed,
            session.difficulty.eaten_speed
        );
        assert_eq!(
            session.events(),
            &[
                GameEvent::GhostEaten {
                    ghost: GhostId::Blinky,
                    points: 200
                },
                GameEvent::GhostEaten {
                    ghost: GhostId::Pinky,
                    points: 400
                },
            ]
        );

        // Eaten ghosts are harmless
        assert!(!resolve_collisions(&mut session));
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_ghost_catches_player() {
        let mut session = playing_session();
        session.ghosts[GhostId::Blinky.index()].pos = session.player.pos;

        assert!(resolve_collisions(&mut session));
        assert_eq!(session.phase(), GamePhase::Death);
        assert_eq!(session.lives, 2);
        assert!(!session.player.alive);
        assert_eq!(session.events(), &[GameEvent::PlayerDeath]);
    }

    #[test]
    fn test_confined_ghost_is_harmless() {
        let mut session = playing_session();
        session.ghosts[GhostId::Clyde.index()].pos = session.player.pos;
        assert!(session.ghost(GhostId::Clyde).in_house);
        assert!(!resolve_collisions(&mut session));
        assert!(session.player.alive);
    }

    #[test]
    fn test_respawn_after_death() {
        let mut session = playing_session();
        session.score = 120;
        session.ghosts[GhostId::Blinky.index()].pos = session.player.pos;
        resolve_collisions(&mut session);

        for _ in 0..session.config.death_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.player.alive);
        assert_eq!(session.player.tile(), IVec2::from(PLAYER_SPAWN));
        assert_eq!(session.ghost(GhostId::Blinky).tile(), GhostId::Blinky.spawn_tile());
        assert_eq!(session.lives, 2);
        assert_eq!(session.score, 120);
    }

    #[test]
    fn test_game_over_then_title() {
        let mut session = playing_session();
        session.lives = 1;
        session.score = 4321;
        session.ghosts[GhostId::Blinky.index()].pos = session.player.pos;
        resolve_collisions(&mut session);
        assert_eq!(session.lives, 0);

        for _ in 0..session.config.death_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.high_score, 4321);

        for _ in 0..session.config.game_over_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Title);

        // A new game resets everything but the high score
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &start);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.high_score, 4321);
    }

    #[test]
    fn test_last_dot_clears_level() {
        let mut session = playing_session();
        for y in 0..MAZE_ROWS {
            for x in 0..MAZE_COLS {
                if (x, y) != (1, 1) {
                    session.maze.consume(x, y);
                }
            }
        }
        assert_eq!(session.maze.remaining_collectibles(), 1);

        place_player(&mut session, 1, 1);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), GamePhase::LevelClear);
        assert_eq!(
            session.events(),
            &[GameEvent::DotEaten, GameEvent::LevelClear]
        );

        for _ in 0..session.config.level_clear_ticks {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.phase(), GamePhase::Ready);
        assert_eq!(session.level, 2);
        assert_eq!(session.maze.remaining_collectibles(), 244);
        assert_eq!(session.difficulty, crate::sim::Difficulty::for_level(2));
        assert_eq!(session.player.speed, session.difficulty.player_speed);
    }

    #[test]
    fn test_frightened_timer_expires() {
        let mut session = playing_session();
        session.start_frightened();
        session.frightened_ticks = 1;
        tick(&mut session, &TickInput::default());
        assert_eq!(session.frightened_ticks, 0);
        assert_eq!(session.ghost(GhostId::Blinky).mode, GhostMode::Chase);
    }

    #[test]
    fn test_input_steers_player() {
        let mut session = playing_session();
        let start_x = session.player.pos.x;
        let input = TickInput {
            direction: Direction::Left,
            ..Default::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.player.dir, Direction::Left);
        assert!(session.player.pos.x < start_x);

        // No input keeps heading
        tick(&mut session, &TickInput::default());
        assert_eq!(session.player.dir, Direction::Left);
    }

    #[test]
    fn test_events_last_one_tick() {
        let mut session = playing_session();
        place_player(&mut session, 1, 1);
        tick(&mut session, &TickInput::default());
        assert_eq!(session.events(), &[GameEvent::DotEaten]);
        tick(&mut session, &TickInput::default());
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_session();
        let mut b = playing_session();
        let inputs = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
        for i in 0..1200 {
            let input = TickInput {
                direction: inputs[(i / 90) % inputs.len()],
                ..Default::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        for (ga, gb) in a.ghosts.iter().zip(&b.ghosts) {
            assert_eq!(ga.pos, gb.pos);
            assert_eq!(ga.mode, gb.mode);
        }
    }
}
