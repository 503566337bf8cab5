//! Procedural obstacle generation
//!
//! Pairs appear just past the right edge on a cooperative repeating timer,
//! scroll left at the difficulty curve's velocity, and are retired once their
//! right edge has left the playfield.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::DifficultyState;
use super::state::GameEvent;
use crate::consts::MS_PER_SECOND;
use crate::tuning::{DifficultyTuning, PlayfieldTuning};

/// The two logical members of an obstacle pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleMember {
    /// Hangs from the top; passing it scores the pair
    Upper,
    /// Rises from the ground
    Lower,
}

impl ObstacleMember {
    pub const BOTH: [ObstacleMember; 2] = [ObstacleMember::Upper, ObstacleMember::Lower];
    pub const SCORING: ObstacleMember = ObstacleMember::Upper;
}

/// Two barriers sharing one gap
///
/// Members are derived from the gap on demand, so they can never disagree
/// about their id, gap or scored flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub gap_center_y: f32,
    pub gap_height: f32,
    pub velocity_x: f32,
    pub width: f32,
    pub scored: bool,
}

impl ObstaclePair {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center_y - self.gap_height * 0.5
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center_y + self.gap_height * 0.5
    }

    pub fn member_bounds(&self, member: ObstacleMember, ground_y: f32) -> Rect {
        match member {
            ObstacleMember::Upper => {
                Rect::new(Vec2::new(self.x, 0.0), Vec2::new(self.right(), self.gap_top()))
            }
            ObstacleMember::Lower => Rect::new(
                Vec2::new(self.x, self.gap_bottom()),
                Vec2::new(self.right(), ground_y),
            ),
        }
    }

    /// Right edge fully past the left edge of the playfield
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Cooperative repeating timer, advanced only by ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    delay_ms: u32,
    /// Delay to adopt when the current cycle completes
    next_delay_ms: Option<u32>,
    elapsed_ms: f32,
    paused: bool,
}

impl SpawnTimer {
    /// A paused timer with the given period
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: delay_ms.max(1),
            next_delay_ms: None,
            elapsed_ms: 0.0,
            paused: true,
        }
    }

    /// Restart the cycle from zero with a new period (still paused)
    pub fn reset(&mut self, delay_ms: u32) {
        *self = Self::new(delay_ms);
    }

    /// Change the period starting with the next cycle
    pub fn set_delay(&mut self, delay_ms: u32) {
        let delay_ms = delay_ms.max(1);
        if delay_ms != self.delay_ms {
            self.next_delay_ms = Some(delay_ms);
        } else {
            self.next_delay_ms = None;
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by `delta_ms`; returns true when a cycle completed
    ///
    /// Fires at most once per call. A backlog longer than one period is
    /// dropped rather than replayed as a burst.
    pub fn advance(&mut self, delta_ms: f32) -> bool {
        if self.paused {
            return false;
        }
        // NaN and negative deltas count as no time
        self.elapsed_ms += delta_ms.max(0.0);
        if self.elapsed_ms < self.delay_ms as f32 {
            return false;
        }
        self.elapsed_ms -= self.delay_ms as f32;
        if let Some(next) = self.next_delay_ms.take() {
            self.delay_ms = next;
        }
        self.elapsed_ms = self.elapsed_ms.min(self.delay_ms as f32 - 1.0).max(0.0);
        true
    }
}

/// Owns the live obstacle pairs and the difficulty they are generated with
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pairs: Vec<ObstaclePair>,
    timer: SpawnTimer,
    difficulty: DifficultyState,
    tuning: DifficultyTuning,
    playfield: PlayfieldTuning,
    /// Never reset, so ids stay unique for the lifetime of the spawner
    next_pair_id: u32,
}

impl ObstacleSpawner {
    pub fn new(tuning: DifficultyTuning, playfield: PlayfieldTuning) -> Self {
        let difficulty = DifficultyState::initial(&tuning);
        Self {
            pairs: Vec::new(),
            timer: SpawnTimer::new(difficulty.spawn_interval_ms),
            difficulty,
            tuning,
            playfield,
            next_pair_id: 1,
        }
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    /// X coordinate at which new pairs appear
    pub fn spawn_x(&self) -> f32 {
        self.playfield.width
    }

    /// Begin a run: initial difficulty, fresh timer, first pair right away
    pub fn start(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        self.difficulty = DifficultyState::initial(&self.tuning);
        self.timer.reset(self.difficulty.spawn_interval_ms);
        self.timer.resume();
        if self.pairs.is_empty() {
            self.try_spawn(rng, events);
        }
    }

    /// Recompute the curve for `score`; the timer adopts the new period on
    /// its next cycle
    pub fn update_difficulty(&mut self, score: u32) {
        self.difficulty = DifficultyState::for_score(score, &self.tuning);
        self.timer.set_delay(self.difficulty.spawn_interval_ms);
    }

    /// Spawn a pair unless one is still within `spacing` of the spawn edge
    pub fn try_spawn(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) -> Option<u32> {
        let spawn_x = self.spawn_x();
        let spacing = self.difficulty.spacing;
        if self.pairs.iter().any(|p| spawn_x - p.x < spacing) {
            log::debug!("Spawn skipped: previous pair within {spacing}px of the edge");
            return None;
        }

        let gap_height = self.difficulty.gap_height;
        let lo = gap_height * 0.5 + self.playfield.top_margin;
        let hi = self.playfield.ground_y() - gap_height * 0.5 - self.playfield.bottom_margin;
        let gap_center_y = if hi > lo {
            rng.random_range(lo..=hi)
        } else {
            // Playfield too small for the margins; center the gap
            (lo + hi) * 0.5
        };

        let pair = ObstaclePair {
            id: self.next_pair_id,
            x: spawn_x,
            gap_center_y,
            gap_height,
            velocity_x: self.difficulty.velocity_x,
            width: self.tuning.pipe_width,
            scored: false,
        };
        self.next_pair_id = self.next_pair_id.wrapping_add(1);

        log::debug!(
            "Pair {} spawned: gap {:.0}±{:.0}, vx {}",
            pair.id,
            pair.gap_center_y,
            gap_height * 0.5,
            pair.velocity_x
        );
        let id = pair.id;
        events.push(GameEvent::PairCreated(pair.clone()));
        self.pairs.push(pair);
        Some(id)
    }

    /// Move every pair and retire those that left the playfield
    pub fn advance(&mut self, delta_ms: f32, events: &mut Vec<GameEvent>) {
        let dt = delta_ms / MS_PER_SECOND;
        for pair in &mut self.pairs {
            pair.x += pair.velocity_x * dt;
        }
        self.pairs.retain(|pair| {
            if pair.is_off_screen() {
                log::debug!("Pair {} retired", pair.id);
                events.push(GameEvent::PairRetired(pair.clone()));
                false
            } else {
                true
            }
        });
    }

    /// Per-tick update: timer-driven spawn, then movement
    pub fn update(&mut self, delta_ms: f32, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        if self.timer.advance(delta_ms) {
            self.try_spawn(rng, events);
        }
        self.advance(delta_ms, events);
    }

    /// Pause spawning and discard every live pair
    pub fn stop_and_clear(&mut self, events: &mut Vec<GameEvent>) {
        self.timer.pause();
        if !self.pairs.is_empty() {
            self.pairs.clear();
            events.push(GameEvent::PairsCleared);
        }
    }

    /// Stop the spawn timer; pairs stay where they are
    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    /// Freeze in place: timer paused and every pair's velocity zeroed
    pub fn freeze(&mut self) {
        self.timer.pause();
        for pair in &mut self.pairs {
            pair.velocity_x = 0.0;
        }
    }

    /// Undo [`ObstacleSpawner::freeze`] using the current difficulty velocity
    pub fn thaw(&mut self) {
        let velocity_x = self.difficulty.velocity_x;
        for pair in &mut self.pairs {
            pair.velocity_x = velocity_x;
        }
        self.timer.resume();
    }
}
