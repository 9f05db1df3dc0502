//! End-to-end session runs through the public API

use maze_chase::SessionConfig;
use maze_chase::sim::{Direction, GameEvent, GamePhase, GhostId, Session, TickInput, tick};
use maze_chase::tile_center;

use glam::IVec2;

fn press_start(session: &mut Session) {
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(session, &start);
}

fn idle(session: &mut Session, ticks: u32) {
    for _ in 0..ticks {
        tick(session, &TickInput::default());
    }
}

/// Short countdowns so life-cycle tests stay quick
fn quick_config() -> SessionConfig {
    SessionConfig::from_json(
        r#"{ "ready_ticks": 2, "death_ticks": 3, "level_clear_ticks": 4, "game_over_ticks": 5 }"#,
    )
    .expect("valid config")
}

fn playing(config: SessionConfig) -> Session {
    let mut session = Session::new(config);
    press_start(&mut session);
    let ticks = session.config.ready_ticks;
    idle(&mut session, ticks);
    assert_eq!(session.phase(), GamePhase::Playing);
    session
}

#[test]
fn test_first_dot_from_spawn() {
    let mut session = playing(SessionConfig::default());
    let left = TickInput {
        direction: Direction::Left,
        ..Default::default()
    };

    let mut ate_on = None;
    for t in 0..30 {
        tick(&mut session, &left);
        if session.events().contains(&GameEvent::DotEaten) {
            ate_on = Some(t);
            break;
        }
    }

    assert!(ate_on.is_some(), "no dot eaten heading left from spawn");
    assert_eq!(session.score, 10);
    assert_eq!(session.maze.remaining_collectibles(), 243);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    let run = || {
        let mut session = Session::new(SessionConfig::with_seed(99));
        press_start(&mut session);
        for i in 0..3000usize {
            let input = TickInput {
                direction: script[(i / 45) % script.len()],
                start: true,
            };
            tick(&mut session, &input);
        }
        serde_json::to_string(&session.snapshot()).expect("snapshot encodes")
    };

    assert_eq!(run(), run());
}

#[test]
fn test_losing_every_life() {
    let mut session = playing(quick_config());
    assert_eq!(session.lives, 3);
    session.score = 1234;

    for lives_left in [2, 1, 0] {
        let blinky = GhostId::Blinky.index();
        session.ghosts[blinky].pos = session.player.pos;
        tick(&mut session, &TickInput::default());

        assert_eq!(session.phase(), GamePhase::Death);
        assert_eq!(session.events(), &[GameEvent::PlayerDeath]);
        assert_eq!(session.lives, lives_left);
        assert!(!session.player.alive);

        let ticks = session.config.death_ticks;
        idle(&mut session, ticks);
        if lives_left > 0 {
            assert_eq!(session.phase(), GamePhase::Playing);
            assert!(session.player.alive);
            assert_eq!(session.player.tile(), IVec2::new(14, 23));
        }
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.high_score, 1234);

    let ticks = session.config.game_over_ticks;
    idle(&mut session, ticks);
    assert_eq!(session.phase(), GamePhase::Title);

    // A new game keeps the high score and resets everything else
    press_start(&mut session);
    assert_eq!(session.phase(), GamePhase::Ready);
    assert_eq!(session.score, 0);
    assert_eq!(session.lives, 3);
    assert_eq!(session.high_score, 1234);
}

#[test]
fn test_clearing_the_board() {
    let mut session = playing(quick_config());
    let level_one_speed = session.difficulty.player_speed;

    // Eat everything except the dot two tiles left of the spawn
    for y in 0..session.maze.height() {
        for x in 0..session.maze.width() {
            if (x, y) != (12, 23) {
                session.maze.consume(x, y);
            }
        }
    }
    assert_eq!(session.maze.remaining_collectibles(), 1);

    // Keep ghosts well away from the player
    for ghost in session.ghosts.iter_mut() {
        ghost.pos = tile_center(IVec2::new(1, 1));
    }

    session.player.next_dir = Direction::Left;
    for _ in 0..30 {
        tick(&mut session, &TickInput::default());
        if session.phase() != GamePhase::Playing {
            break;
        }
    }

    assert_eq!(session.phase(), GamePhase::LevelClear);
    assert_eq!(
        session.events(),
        &[GameEvent::DotEaten, GameEvent::LevelClear]
    );

    let ticks = session.config.level_clear_ticks;
    idle(&mut session, ticks);
    assert_eq!(session.phase(), GamePhase::Ready);
    assert_eq!(session.level, 2);
    assert_eq!(session.maze.remaining_collectibles(), 244);
    assert!(session.difficulty.player_speed > level_one_speed);
}
