//! The player-controlled actor
//!
//! A single vertical degree of freedom: gravity pulls it down every tick and
//! a flap overrides its velocity with a fixed upward impulse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::GamePhase;
use crate::consts::MS_PER_SECOND;
use crate::tuning::ActorTuning;

/// Observational nose attitude, derived from the sign of vertical velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tilt {
    NoseUp,
    #[default]
    Level,
    NoseDown,
}

impl Tilt {
    pub fn from_velocity(velocity_y: f32) -> Self {
        if velocity_y < 0.0 {
            Tilt::NoseUp
        } else if velocity_y > 0.0 {
            Tilt::NoseDown
        } else {
            Tilt::Level
        }
    }

    /// Rotation in degrees for a renderer (negative = nose up)
    pub fn degrees(self, magnitude: f32) -> f32 {
        match self {
            Tilt::NoseUp => -magnitude,
            Tilt::Level => 0.0,
            Tilt::NoseDown => magnitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Center position; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity in px/s (negative = up)
    pub velocity_y: f32,
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Velocity assigned on flap
    pub flap_impulse: f32,
    pub size: Vec2,
    pub gravity_enabled: bool,
    /// Active and visible
    pub alive: bool,
    pub tilt: Tilt,
    /// Rotation magnitude for [`Tilt::NoseUp`]/[`Tilt::NoseDown`]
    pub tilt_degrees: f32,
    /// Velocity stashed while suspended
    #[serde(default)]
    suspended_velocity: Option<f32>,
}

impl Actor {
    /// A hidden, inactive actor parked at the start position
    pub fn new(tuning: &ActorTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.start_x, tuning.start_y),
            velocity_y: 0.0,
            gravity: tuning.gravity,
            flap_impulse: tuning.flap_impulse,
            size: Vec2::new(tuning.width, tuning.height),
            gravity_enabled: false,
            alive: false,
            tilt: Tilt::Level,
            tilt_degrees: tuning.tilt_degrees,
            suspended_velocity: None,
        }
    }

    /// (Re)activate at the start position with zero velocity and gravity on
    pub fn reset(&mut self, tuning: &ActorTuning) {
        *self = Self::new(tuning);
        self.gravity_enabled = true;
        self.alive = true;
    }

    pub fn deactivate(&mut self) {
        self.alive = false;
        self.suspended_velocity = None;
    }

    /// Stop all motion (game over)
    pub fn freeze(&mut self) {
        self.gravity_enabled = false;
        self.velocity_y = 0.0;
    }

    /// Freeze for a pause, remembering the velocity for [`Actor::resume`]
    pub fn suspend(&mut self) {
        if self.suspended_velocity.is_none() {
            self.suspended_velocity = Some(self.velocity_y);
        }
        self.freeze();
    }

    /// Undo [`Actor::suspend`]: gravity back on, velocity restored
    pub fn resume(&mut self) {
        self.gravity_enabled = true;
        if let Some(velocity) = self.suspended_velocity.take() {
            self.velocity_y = velocity;
        }
    }

    pub fn apply_gravity(&mut self, delta_ms: f32) {
        if self.gravity_enabled {
            self.velocity_y += self.gravity * (delta_ms / MS_PER_SECOND);
        }
    }

    /// Override vertical velocity with the flap impulse
    ///
    /// Only honored while running; input in any other phase is dropped, not
    /// queued. Returns whether the flap took effect.
    pub fn flap(&mut self, phase: GamePhase) -> bool {
        if phase != GamePhase::Running || !self.alive {
            return false;
        }
        self.velocity_y = self.flap_impulse;
        true
    }

    /// Advance one tick: gravity, integration, world-bounds clamp, tilt
    pub fn update(&mut self, _time: f64, delta_ms: f32, world_height: f32) {
        if !self.alive {
            return;
        }
        self.apply_gravity(delta_ms);
        self.pos.y += self.velocity_y * (delta_ms / MS_PER_SECOND);

        // Bounds block further motion but never move the actor back
        let half_height = self.size.y * 0.5;
        if self.pos.y - half_height < 0.0 && self.velocity_y < 0.0 {
            self.velocity_y = 0.0;
        }
        if self.pos.y + half_height > world_height && self.velocity_y > 0.0 {
            self.velocity_y = 0.0;
        }

        self.tilt = Tilt::from_velocity(self.velocity_y);
    }

    /// Current rotation in degrees (negative = nose up)
    pub fn rotation(&self) -> f32 {
        self.tilt.degrees(self.tilt_degrees)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAP: f32 = crate::consts::FLAP_IMPULSE;

    fn running_actor() -> Actor {
        let tuning = ActorTuning::default();
        let mut actor = Actor::new(&tuning);
        actor.reset(&tuning);
        actor
    }

    #[test]
    fn test_new_actor_is_inactive() {
        let actor = Actor::new(&ActorTuning::default());
        assert!(!actor.alive);
        assert!(!actor.gravity_enabled);
        assert_eq!(actor.velocity_y, 0.0);
    }

    #[test]
    fn test_gravity_integration() {
        let mut actor = running_actor();
        actor.apply_gravity(1000.0);
        assert!((actor.velocity_y - 1300.0).abs() < 0.001);

        actor.freeze();
        actor.apply_gravity(1000.0);
        assert_eq!(actor.velocity_y, 0.0);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut actor = running_actor();
        assert_eq!(actor.velocity_y, 0.0);
        assert!(actor.flap(GamePhase::Running));
        assert_eq!(actor.velocity_y, FLAP);

        // Not additive, regardless of prior velocity
        actor.velocity_y = 480.0;
        actor.flap(GamePhase::Running);
        assert_eq!(actor.velocity_y, FLAP);
        actor.flap(GamePhase::Running);
        assert_eq!(actor.velocity_y, FLAP);
    }

    #[test]
    fn test_flap_ignored_outside_running() {
        let mut actor = running_actor();
        for phase in [GamePhase::PreStart, GamePhase::GameOver, GamePhase::Paused] {
            assert!(!actor.flap(phase));
            assert_eq!(actor.velocity_y, 0.0);
        }
    }

    #[test]
    fn test_update_moves_and_tilts() {
        let mut actor = running_actor();
        let start_y = actor.pos.y;
        actor.update(0.0, 100.0, 600.0);
        assert!(actor.pos.y > start_y);
        assert_eq!(actor.tilt, Tilt::NoseDown);

        actor.flap(GamePhase::Running);
        actor.update(100.0, 1.0, 600.0);
        assert_eq!(actor.tilt, Tilt::NoseUp);
        assert_eq!(actor.rotation(), -15.0);
    }

    #[test]
    fn test_top_clamp_stops_without_teleport() {
        let mut actor = running_actor();
        actor.freeze();
        actor.pos.y = 10.0;
        actor.velocity_y = -350.0;
        actor.update(0.0, 10.0, 600.0);
        // Moved up by 3.5px, then upward motion blocked in place
        assert!((actor.pos.y - 6.5).abs() < 0.001);
        assert_eq!(actor.velocity_y, 0.0);
    }

    #[test]
    fn test_suspend_resume_restores_velocity() {
        let mut actor = running_actor();
        actor.velocity_y = 123.0;
        actor.suspend();
        assert_eq!(actor.velocity_y, 0.0);
        assert!(!actor.gravity_enabled);
        actor.resume();
        assert_eq!(actor.velocity_y, 123.0);
        assert!(actor.gravity_enabled);
    }

    #[test]
    fn test_inactive_actor_does_not_move() {
        let mut actor = Actor::new(&ActorTuning::default());
        let before = actor.clone();
        actor.update(0.0, 16.0, 600.0);
        assert_eq!(actor, before);
    }
}
