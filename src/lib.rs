//! Flappy Gates - A gated-obstacle flapping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, scoring, phases)
//! - `game`: Frame-driver facade over the simulation
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScoreStore;
pub use tuning::GameConfig;

/// Game configuration constants (defaults for [`tuning::GameConfig`])
pub mod consts {
    /// Milliseconds per simulated second; velocities are in px/s, deltas in ms
    pub const MS_PER_SECOND: f32 = 1000.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Keep obstacle gaps away from the top edge and the ground
    pub const GAP_TOP_MARGIN: f32 = 50.0;
    pub const GAP_BOTTOM_MARGIN: f32 = 50.0;

    /// Actor defaults
    pub const ACTOR_START_X: f32 = PLAYFIELD_WIDTH / 2.0 - 100.0;
    pub const ACTOR_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    /// Downward acceleration (px/s²), world gravity plus the actor's own
    pub const ACTOR_GRAVITY: f32 = 1300.0;
    /// Upward velocity set on flap (px/s)
    pub const FLAP_IMPULSE: f32 = -350.0;
    /// Visual tilt magnitude in degrees
    pub const TILT_DEGREES: f32 = 15.0;

    /// Obstacle width (px)
    pub const PIPE_WIDTH: f32 = 80.0;

    /// Difficulty curve
    pub const INITIAL_VELOCITY_X: f32 = -150.0;
    pub const VELOCITY_X_STEP_PER_POINT: f32 = -2.0;
    pub const MAX_VELOCITY_X: f32 = -300.0;
    pub const INITIAL_GAP_HEIGHT: f32 = 150.0;
    pub const MIN_GAP_HEIGHT: f32 = 100.0;
    pub const INITIAL_SPACING: f32 = 250.0;
    pub const MIN_SPACING: f32 = 180.0;
    /// Gap and spacing shrink by `STEP_SIZE` every `STEP_EVERY` points
    pub const STEP_EVERY: u32 = 2;
    pub const STEP_SIZE: f32 = 2.0;
    pub const INITIAL_SPAWN_INTERVAL_MS: u32 = 2000;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 20;
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 1000;
    /// Smallest gap ever produced, whatever the tuning says
    pub const MIN_SENSIBLE_GAP: f32 = 60.0;

    /// Delay between the start input and gameplay (lets the start cue play)
    pub const START_DELAY_MS: f64 = 100.0;
    /// Delay before the restart input is accepted on game over
    pub const RESTART_DELAY_MS: f64 = 500.0;
    /// Score milestone interval (celebration + background toggle)
    pub const MILESTONE_INTERVAL: u32 = 10;
    /// Score thresholds for music levels 2..=6
    pub const MUSIC_THRESHOLDS: [u32; 5] = [20, 40, 60, 80, 100];
}
