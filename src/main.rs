//! Maze Chase entry point
//!
//! Native headless host: runs the simulation at full speed with a demo
//! autopilot at the controls, then prints a JSON summary of the run.
//!
//! Usage: `maze-chase [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Chase (native) starting...");

    let config = demo::load_config(std::env::args().nth(1).as_deref());
    log::info!("Session seed: {}", config.seed);

    let summary = demo::run(config);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `sim::tick` from their own frame loop
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;

    use glam::IVec2;
    use maze_chase::SessionConfig;
    use maze_chase::audio::{LogAudio, dispatch};
    use maze_chase::consts::TICK_RATE;
    use maze_chase::sim::{Direction, GamePhase, Session, TickInput, find_path, tick};

    /// Simulated seconds before the demo gives up
    const DEMO_SECONDS: u32 = 300;

    /// Config from a JSON file, or defaults if there is none or it is unreadable
    pub fn load_config(path: Option<&str>) -> SessionConfig {
        let Some(path) = path else {
            return SessionConfig::default();
        };
        match read_config(path) {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {path}: {e}; using defaults");
                SessionConfig::default()
            }
        }
    }

    fn read_config(path: &str) -> Result<SessionConfig, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(SessionConfig::from_json(&json)?)
    }

    /// Play one game and report how it went
    pub fn run(config: SessionConfig) -> serde_json::Value {
        let mut session = Session::new(config);
        let mut audio = LogAudio::new();
        let max_ticks = DEMO_SECONDS * TICK_RATE;

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut session, &start);

        let mut ticks = 1;
        while ticks < max_ticks && session.phase() != GamePhase::GameOver {
            let input = TickInput {
                direction: autopilot(&session),
                ..Default::default()
            };
            tick(&mut session, &input);
            dispatch(session.events(), &mut audio);
            ticks += 1;
        }

        log::info!(
            "Demo finished after {ticks} ticks: level {}, score {}, lives {}",
            session.level,
            session.score,
            session.lives
        );

        serde_json::json!({
            "ticks": ticks,
            "phase": session.phase(),
            "level": session.level,
            "score": session.score,
            "high_score": session.high_score,
            "lives": session.lives,
            "remaining": session.maze.remaining_collectibles(),
            "sounds": audio.played(),
        })
    }

    /// Head for the closest collectible along a shortest route
    fn autopilot(session: &Session) -> Direction {
        if session.phase() != GamePhase::Playing {
            return Direction::None;
        }
        let from = session.player.tile();
        nearest_collectible(session, from)
            .and_then(|target| find_path(&session.maze, from, target))
            .and_then(|path| path.first().copied())
            .unwrap_or(Direction::None)
    }

    /// Closest dot or pellet by grid distance
    fn nearest_collectible(session: &Session, from: IVec2) -> Option<IVec2> {
        let maze = &session.maze;
        (0..maze.height())
            .flat_map(|y| (0..maze.width()).map(move |x| IVec2::new(x, y)))
            .filter(|t| maze.tile_at(t.x, t.y).is_collectible())
            .min_by_key(|t| (*t - from).abs().element_sum())
    }
}
