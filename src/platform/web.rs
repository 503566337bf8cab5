//! Browser bindings
//!
//! The page forwards DOM events and `requestAnimationFrame` timestamps; each
//! frame returns the drained presentation events as JSON.

use wasm_bindgen::prelude::*;

use super::{InputMapper, RawInput};
use crate::persistence::WebStorage;
use crate::{Game, GameConfig};

/// Longest frame delta fed to the simulation (tab throttling, debugger stops)
const MAX_FRAME_MS: f64 = 250.0;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Flappy Gates loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<WebStorage>,
    input: InputMapper,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, tuning_json: Option<String>) -> WebGame {
        let config = match tuning_json.as_deref().map(GameConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Using default tuning: {e:#}");
                GameConfig::default()
            }
            None => GameConfig::default(),
        };
        log::info!("Starting with seed {seed}");
        WebGame {
            game: Game::new(config, WebStorage, seed as u64),
            input: InputMapper::new(),
            last_time: None,
        }
    }

    pub fn pointer_down(&mut self) {
        self.input.push(&RawInput::PointerDown);
    }

    pub fn key_down(&mut self, key: String) {
        self.input.push(&RawInput::KeyDown { key });
    }

    pub fn key_up(&mut self, key: String) {
        self.input.push(&RawInput::KeyUp { key });
    }

    pub fn visibility_changed(&mut self, hidden: bool) {
        self.input.push(&if hidden {
            RawInput::VisibilityHidden
        } else {
            RawInput::VisibilityVisible
        });
    }

    pub fn window_blur(&mut self) {
        self.input.push(&RawInput::WindowBlur);
    }

    pub fn window_focus(&mut self) {
        self.input.push(&RawInput::WindowFocus);
    }

    /// Run one frame at `time` (ms); returns the frame's events as JSON
    pub fn frame(&mut self, time: f64) -> String {
        let delta = match self.last_time {
            Some(last) => (time - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_time = Some(time);

        for input in self.input.drain() {
            self.game.handle_input(input);
        }
        self.game.tick(time, delta as f32);

        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Could not encode events: {e}");
            "[]".to_string()
        })
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn high_score(&self) -> u32 {
        self.game.high_score()
    }

    /// Actor center, rotation and obstacle rectangles as JSON for the renderer
    pub fn snapshot(&self) -> String {
        let session = self.game.session();
        let ground_y = session.config.playfield.ground_y();
        let pairs: Vec<_> = session
            .spawner
            .pairs()
            .iter()
            .map(|p| {
                (
                    p.id,
                    p.member_bounds(crate::sim::ObstacleMember::Upper, ground_y),
                    p.member_bounds(crate::sim::ObstacleMember::Lower, ground_y),
                )
            })
            .collect();
        let snapshot = serde_json::json!({
            "actor": {
                "pos": session.actor.pos,
                "rotation": session.actor.rotation(),
                "visible": session.actor.alive,
            },
            "pairs": pairs,
        });
        snapshot.to_string()
    }
}
