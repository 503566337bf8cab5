//! Frame-driver facade
//!
//! Owns the phase machine, the session and the high score store. The host
//! calls [`Game::handle_input`] for each logical input and [`Game::tick`] once
//! per frame, then drains [`GameEvent`]s for presentation.

use crate::highscores::HighScoreStore;
use crate::persistence::Storage;
use crate::platform::InputEvent;
use crate::sim::{
    DelayedAction, GameEvent, GamePhase, InputAction, Session, StateMachine, build_state_machine,
};
use crate::tuning::GameConfig;

pub struct Game<S: Storage> {
    fsm: StateMachine<Session>,
    session: Session,
    high_scores: HighScoreStore<S>,
}

impl<S: Storage> Game<S> {
    /// Load the high score and enter PRESTART
    pub fn new(config: GameConfig, storage: S, seed: u64) -> Self {
        let high_scores = HighScoreStore::load(storage);
        let mut session = Session::new(config, seed, high_scores.best());
        let mut fsm = build_state_machine();
        fsm.start(&mut session);
        Self {
            fsm,
            session,
            high_scores,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.fsm.current()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access for debugging tools and tests
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn high_scores(&self) -> &HighScoreStore<S> {
        &self.high_scores
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    /// Interpret one logical input in the current phase
    pub fn handle_input(&mut self, input: InputEvent) {
        let phase = self.fsm.current();
        match input {
            InputEvent::Activate if phase == GamePhase::Running => {
                if self.session.actor.flap(phase) {
                    self.session.events.push(GameEvent::Flapped);
                }
            }
            InputEvent::Activate => match self.session.listeners.consume(phase) {
                Some(InputAction::Start) => {
                    self.session.events.push(GameEvent::StartCue);
                    let delay = self.session.config.timing.start_delay_ms;
                    self.session.scheduler.after(delay, DelayedAction::BeginRun);
                }
                Some(InputAction::Restart) => {
                    self.fsm.transition(&mut self.session, GamePhase::PreStart);
                }
                Some(InputAction::Resume) => {
                    self.fsm.transition(&mut self.session, GamePhase::Running);
                }
                None => log::debug!("Input ignored in '{}'", phase.as_str()),
            },
            InputEvent::Suspend if phase == GamePhase::Running => {
                log::info!("Auto-paused");
                self.fsm.transition(&mut self.session, GamePhase::Paused);
            }
            InputEvent::Suspend => {}
        }
    }

    /// Advance one frame
    ///
    /// `time_ms` is the frame driver's monotonic clock, `delta_ms` the time
    /// since the previous frame; negative or NaN deltas count as zero.
    /// Returns the phase entered during the frame, if any.
    pub fn tick(&mut self, time_ms: f64, delta_ms: f32) -> Option<GamePhase> {
        let delta_ms = delta_ms.max(0.0);
        self.session.scheduler.set_now(time_ms);
        let mut entered = None;

        for action in self.session.scheduler.take_due() {
            let phase = self.fsm.current();
            match action {
                DelayedAction::BeginRun if phase == GamePhase::PreStart => {
                    if self.fsm.transition(&mut self.session, GamePhase::Running) {
                        entered = Some(GamePhase::Running);
                    }
                }
                DelayedAction::ArmRestart if phase == GamePhase::GameOver => {
                    self.session
                        .listeners
                        .once(GamePhase::GameOver, InputAction::Restart);
                }
                stale => log::debug!("Dropping {stale:?} in '{}'", phase.as_str()),
            }
        }

        if let Some(phase) = self.fsm.tick(&mut self.session, time_ms, delta_ms) {
            entered = Some(phase);
        }

        if let Some(score) = self.session.pending_high_score.take() {
            self.high_scores.record(score);
        }
        entered
    }
}
