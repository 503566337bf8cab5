//! Difficulty curve
//!
//! A pure function of cumulative score. Obstacle speed grows linearly up to a
//! cap; gap height and spacing shrink in steps down to their floors; the spawn
//! interval decays with score but never drops below the time an obstacle needs
//! to travel `spacing`, so consecutive pairs can never overlap.

use serde::{Deserialize, Serialize};

use crate::consts::MS_PER_SECOND;
use crate::tuning::DifficultyTuning;

/// Slowest obstacle speed the curve will ever produce (px/s)
const MIN_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Horizontal obstacle velocity in px/s (always negative)
    pub velocity_x: f32,
    /// Vertical gap between the members of a pair
    pub gap_height: f32,
    /// Minimum horizontal distance between consecutive spawns
    pub spacing: f32,
    /// Spawn timer period
    pub spawn_interval_ms: u32,
}

impl DifficultyState {
    pub fn initial(tuning: &DifficultyTuning) -> Self {
        Self::for_score(0, tuning)
    }

    pub fn for_score(score: u32, tuning: &DifficultyTuning) -> Self {
        let velocity_x = (tuning.initial_velocity_x + score as f32 * tuning.velocity_step)
            .max(tuning.max_velocity_x)
            .min(-MIN_SPEED);

        let steps = score / tuning.step_every.max(1);
        let shrink = steps as f32 * tuning.step_size;

        let gap_height = (tuning.initial_gap - shrink)
            .max(tuning.min_gap)
            .max(tuning.min_sensible_gap);

        // A pair must at least clear its own width before the next one appears
        let spacing = (tuning.initial_spacing - shrink)
            .max(tuning.min_spacing)
            .max(tuning.pipe_width);

        let decayed = tuning
            .initial_spawn_interval_ms
            .saturating_sub(score.saturating_mul(tuning.spawn_interval_step_ms))
            .max(tuning.min_spawn_interval_ms);
        let travel_ms = (spacing * MS_PER_SECOND / velocity_x.abs()).ceil() as u32;

        Self {
            velocity_x,
            gap_height,
            spacing,
            spawn_interval_ms: decayed.max(travel_ms),
        }
    }

    /// Obstacle speed magnitude (px/s)
    pub fn speed(&self) -> f32 {
        self.velocity_x.abs()
    }

    /// Distance an obstacle covers during one spawn interval
    pub fn travel_per_interval(&self) -> f32 {
        self.spawn_interval_ms as f32 / MS_PER_SECOND * self.speed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve(score: u32) -> DifficultyState {
        DifficultyState::for_score(score, &DifficultyTuning::default())
    }

    #[test]
    fn test_initial_values() {
        let d = curve(0);
        assert_eq!(d.velocity_x, -150.0);
        assert_eq!(d.gap_height, 150.0);
        assert_eq!(d.spacing, 250.0);
        assert_eq!(d.spawn_interval_ms, 2000);
    }

    #[test]
    fn test_stepwise_shrink() {
        let d = curve(1);
        assert_eq!(d.gap_height, 150.0);
        assert_eq!(d.spacing, 250.0);

        let d = curve(2);
        assert_eq!(d.gap_height, 148.0);
        assert_eq!(d.spacing, 248.0);
    }

    #[test]
    fn test_velocity_at_forty() {
        assert_eq!(curve(40).velocity_x, -230.0);
    }

    #[test]
    fn test_floors() {
        let d = curve(10_000);
        assert_eq!(d.velocity_x, -300.0);
        assert_eq!(d.gap_height, 100.0);
        assert_eq!(d.spacing, 180.0);
        assert_eq!(d.spawn_interval_ms, 1000);
    }

    #[test]
    fn test_travel_floor_beats_decayed_interval() {
        // Slow obstacles with large spacing: decayed interval alone would overlap
        let tuning = DifficultyTuning {
            initial_velocity_x: -50.0,
            velocity_step: 0.0,
            max_velocity_x: -50.0,
            ..DifficultyTuning::default()
        };
        let d = DifficultyState::for_score(0, &tuning);
        assert_eq!(d.spawn_interval_ms, 5000);
    }

    #[test]
    fn test_degenerate_tuning_is_clamped() {
        let tuning = DifficultyTuning {
            initial_velocity_x: 0.0,
            velocity_step: 0.0,
            initial_gap: 5.0,
            min_gap: 0.0,
            step_every: 0,
            ..DifficultyTuning::default()
        };
        let d = DifficultyState::for_score(3, &tuning);
        assert_eq!(d.velocity_x, -MIN_SPEED);
        assert_eq!(d.gap_height, tuning.min_sensible_gap);
        assert!(d.travel_per_interval() >= d.spacing);
    }

    proptest! {
        #[test]
        fn prop_monotonic(s1 in 0u32..2000, delta in 0u32..2000) {
            let s2 = s1 + delta;
            let (a, b) = (curve(s1), curve(s2));
            prop_assert!(b.speed() >= a.speed());
            prop_assert!(b.gap_height <= a.gap_height);
            prop_assert!(b.spacing <= a.spacing);
        }

        #[test]
        fn prop_bounded_by_floors(score in any::<u32>()) {
            let d = curve(score);
            prop_assert!(d.speed() <= 300.0);
            prop_assert!(d.gap_height >= 100.0);
            prop_assert!(d.spacing >= 180.0);
            prop_assert!(d.spawn_interval_ms >= 1000);
        }

        #[test]
        fn prop_no_overlap(score in any::<u32>()) {
            let d = curve(score);
            // Allow for f32 rounding in the check itself
            prop_assert!(d.travel_per_interval() + 1e-3 >= d.spacing);
        }
    }
}
