//! Flappy Gates headless driver
//!
//! Runs the simulation at 60 Hz with an autopilot pressing "activate" and logs
//! the presentation events a renderer would consume.
//!
//! Usage: `flappy-gates [frames] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_gates::persistence::FileStorage;
    use flappy_gates::{Game, GameConfig};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames: u32 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 60 * 60,
    };
    let config = match args.next() {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Flappy Gates (headless) starting with seed {seed}");

    let storage = FileStorage::new("flappy-gates-save.json");
    let mut game = Game::new(config, storage, seed);
    let mut autopilot = autopilot::Autopilot::default();

    let frame_ms = 1000.0 / 60.0;
    for frame in 0..frames {
        let time = frame as f64 * frame_ms as f64;
        for input in autopilot.decide(&game) {
            game.handle_input(input);
        }
        game.tick(time, frame_ms);
        for event in game.drain_events() {
            autopilot::log_event(&event);
        }
    }

    log::info!(
        "Finished after {frames} frames: score {}, best {}",
        game.score(),
        game.high_score()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven through the library
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use flappy_gates::Game;
    use flappy_gates::persistence::Storage;
    use flappy_gates::platform::InputEvent;
    use flappy_gates::sim::{GameEvent, GamePhase};

    /// Flaps whenever the actor sinks below the next gap's center
    #[derive(Debug, Default)]
    pub struct Autopilot {
        last_phase: Option<GamePhase>,
    }

    impl Autopilot {
        pub fn decide<S: Storage>(&mut self, game: &Game<S>) -> Vec<InputEvent> {
            let phase = game.phase();
            let entered = self.last_phase != Some(phase);
            self.last_phase = Some(phase);

            let session = game.session();
            match phase {
                GamePhase::PreStart if entered => vec![InputEvent::Activate],
                GamePhase::GameOver if session.listeners.is_armed(GamePhase::GameOver) => {
                    vec![InputEvent::Activate]
                }
                GamePhase::Running => {
                    let actor = &session.actor;
                    let actor_left = actor.bounds().left();
                    let target_y = session
                        .spawner
                        .pairs()
                        .iter()
                        .find(|p| p.right() >= actor_left)
                        .map(|p| p.gap_center_y + p.gap_height * 0.25)
                        .unwrap_or(session.config.playfield.ground_y() * 0.5);
                    if actor.pos.y > target_y && actor.velocity_y >= 0.0 {
                        vec![InputEvent::Activate]
                    } else {
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            }
        }
    }

    pub fn log_event(event: &GameEvent) {
        match event {
            GameEvent::PairCreated(_)
            | GameEvent::PairRetired(_)
            | GameEvent::Flapped
            | GameEvent::PhaseExited(_) => log::debug!("{event:?}"),
            _ => log::info!("{event:?}"),
        }
    }
}
