//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through ticks supplied by the frame driver
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod difficulty;
pub mod fsm;
pub mod listeners;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::{Actor, Tilt};
pub use collision::{CollisionKind, Rect, check_collision, collisions};
pub use difficulty::DifficultyState;
pub use fsm::{PhaseHandlers, StateMachine};
pub use listeners::{DelayedAction, InputAction, InputListeners, ListenerId, Scheduler};
pub use scoring::ScoreTracker;
pub use spawner::{ObstacleMember, ObstaclePair, ObstacleSpawner, SpawnTimer};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::build_state_machine;
