//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from a [`GameConfig`].
//! Defaults mirror [`crate::consts`]; a JSON file may override any subset.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldTuning {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    /// Minimum distance between a gap and the top edge
    pub top_margin: f32,
    /// Minimum distance between a gap and the ground
    pub bottom_margin: f32,
}

impl Default for PlayfieldTuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            top_margin: GAP_TOP_MARGIN,
            bottom_margin: GAP_BOTTOM_MARGIN,
        }
    }
}

impl PlayfieldTuning {
    /// Y coordinate of the ground plane (top surface)
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Actor physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub flap_impulse: f32,
    pub tilt_degrees: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            start_x: ACTOR_START_X,
            start_y: ACTOR_START_Y,
            width: ACTOR_WIDTH,
            height: ACTOR_HEIGHT,
            gravity: ACTOR_GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            tilt_degrees: TILT_DEGREES,
        }
    }
}

/// Difficulty curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub initial_velocity_x: f32,
    pub velocity_step: f32,
    /// Most negative velocity allowed
    pub max_velocity_x: f32,
    pub initial_gap: f32,
    pub min_gap: f32,
    pub initial_spacing: f32,
    pub min_spacing: f32,
    pub step_every: u32,
    pub step_size: f32,
    pub initial_spawn_interval_ms: u32,
    pub spawn_interval_step_ms: u32,
    pub min_spawn_interval_ms: u32,
    pub pipe_width: f32,
    pub min_sensible_gap: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            initial_velocity_x: INITIAL_VELOCITY_X,
            velocity_step: VELOCITY_X_STEP_PER_POINT,
            max_velocity_x: MAX_VELOCITY_X,
            initial_gap: INITIAL_GAP_HEIGHT,
            min_gap: MIN_GAP_HEIGHT,
            initial_spacing: INITIAL_SPACING,
            min_spacing: MIN_SPACING,
            step_every: STEP_EVERY,
            step_size: STEP_SIZE,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            pipe_width: PIPE_WIDTH,
            min_sensible_gap: MIN_SENSIBLE_GAP,
        }
    }
}

/// Phase timing and presentation thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    pub start_delay_ms: f64,
    pub restart_delay_ms: f64,
    pub milestone_interval: u32,
    pub music_thresholds: Vec<u32>,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            start_delay_ms: START_DELAY_MS,
            restart_delay_ms: RESTART_DELAY_MS,
            milestone_interval: MILESTONE_INTERVAL,
            music_thresholds: MUSIC_THRESHOLDS.to_vec(),
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldTuning,
    pub actor: ActorTuning,
    pub difficulty: DifficultyTuning,
    pub timing: TimingTuning,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid tuning JSON")
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load tuning, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded tuning from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                log::warn!("Using default tuning: {e:#}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing tuning")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let config = GameConfig::default();
        assert_eq!(config.difficulty.initial_velocity_x, -150.0);
        assert_eq!(config.difficulty.initial_spawn_interval_ms, 2000);
        assert_eq!(config.playfield.ground_y(), 550.0);
        assert_eq!(config.timing.music_thresholds, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "actor": { "gravity": 900.0 } }"#).unwrap();
        assert_eq!(config.actor.gravity, 900.0);
        assert_eq!(config.actor.flap_impulse, FLAP_IMPULSE);
        assert_eq!(config.difficulty, DifficultyTuning::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(dir.path().join("missing.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        let mut config = GameConfig::default();
        config.timing.start_delay_ms = 250.0;
        std::fs::write(&path, config.to_json().unwrap()).unwrap();
        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }
}
