//! Score tracking
//!
//! A pair scores once, when its scoring member's right edge falls strictly
//! behind the actor's left edge. Each point re-evaluates the difficulty curve
//! and may fire presentation hooks (milestones, background, music level).

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::spawner::ObstacleSpawner;
use super::state::GameEvent;
use crate::tuning::TimingTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    background_day: bool,
    /// 0 = gameplay music off, 1.. = level
    music_level: u8,
    milestone_interval: u32,
    music_thresholds: Vec<u32>,
}

impl ScoreTracker {
    pub fn new(timing: &TimingTuning) -> Self {
        Self {
            score: 0,
            background_day: true,
            music_level: 0,
            milestone_interval: timing.milestone_interval.max(1),
            music_thresholds: timing.music_thresholds.clone(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Raise the score without scoring a pair (debug tools, tests)
    ///
    /// Never lowers it; only [`ScoreTracker::reset`] goes back to zero.
    #[doc(hidden)]
    pub fn set_score(&mut self, score: u32) {
        self.score = self.score.max(score);
    }

    pub fn background_day(&self) -> bool {
        self.background_day
    }

    pub fn music_level(&self) -> u8 {
        self.music_level
    }

    /// Back to zero with the day background
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.score = 0;
        events.push(GameEvent::ScoreChanged { score: 0 });
        if !self.background_day {
            self.background_day = true;
            events.push(GameEvent::BackgroundChanged { day: true });
        }
    }

    /// Gameplay music starts at level 1
    pub fn start_music(&mut self, events: &mut Vec<GameEvent>) {
        self.set_music_level(1, events);
    }

    pub fn stop_music(&mut self, events: &mut Vec<GameEvent>) {
        self.set_music_level(0, events);
    }

    fn set_music_level(&mut self, level: u8, events: &mut Vec<GameEvent>) {
        if self.music_level != level {
            self.music_level = level;
            events.push(GameEvent::MusicLevelChanged { level });
        }
    }

    /// Level for the current score: 1 plus every threshold reached
    fn level_for_score(&self) -> u8 {
        let reached = self
            .music_thresholds
            .iter()
            .filter(|&&t| self.score >= t)
            .count();
        (1 + reached).min(u8::MAX as usize) as u8
    }

    /// Score every pair the actor has passed; returns points awarded
    pub fn check(
        &mut self,
        actor: &Actor,
        spawner: &mut ObstacleSpawner,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        if !actor.alive {
            return 0;
        }
        let actor_left = actor.bounds().left();
        let mut awarded = 0;

        for index in 0..spawner.pairs().len() {
            let pair = &mut spawner.pairs_mut()[index];
            if pair.scored || pair.right() >= actor_left {
                continue;
            }
            // One flag covers both members of the pair
            pair.scored = true;
            let pair_id = pair.id;

            self.score += 1;
            awarded += 1;
            log::info!("Score: {} (pair {})", self.score, pair_id);
            events.push(GameEvent::ScoreChanged { score: self.score });

            if self.music_level > 0 {
                let level = self.level_for_score();
                if level > self.music_level {
                    self.set_music_level(level, events);
                }
            }

            if self.score % self.milestone_interval == 0 {
                self.background_day = !self.background_day;
                log::info!("Milestone {} reached", self.score);
                events.push(GameEvent::ScoreMilestone { score: self.score });
                events.push(GameEvent::BackgroundChanged {
                    day: self.background_day,
                });
            }

            spawner.update_difficulty(self.score);
        }

        awarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{ActorTuning, DifficultyTuning, PlayfieldTuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (ScoreTracker, Actor, ObstacleSpawner, Vec<GameEvent>) {
        let tuning = ActorTuning::default();
        let mut actor = Actor::new(&tuning);
        actor.reset(&tuning);
        let spawner = ObstacleSpawner::new(DifficultyTuning::default(), PlayfieldTuning::default());
        (
            ScoreTracker::new(&TimingTuning::default()),
            actor,
            spawner,
            Vec::new(),
        )
    }

    fn spawn_at(spawner: &mut ObstacleSpawner, x: f32, events: &mut Vec<GameEvent>) -> u32 {
        let mut rng = Pcg32::seed_from_u64(9);
        // Move existing pairs out of the guard zone first
        for pair in spawner.pairs_mut() {
            pair.x -= 1000.0;
        }
        let id = spawner.try_spawn(&mut rng, events).unwrap();
        let last = spawner.pairs_mut().len() - 1;
        spawner.pairs_mut()[last].x = x;
        id
    }

    #[test]
    fn test_scores_only_when_strictly_behind() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        let left = actor.bounds().left();

        // Right edge exactly at the actor's left edge: not yet
        spawn_at(&mut spawner, left - 80.0, &mut events);
        assert_eq!(tracker.check(&actor, &mut spawner, &mut events), 0);

        spawner.pairs_mut()[0].x -= 0.5;
        assert_eq!(tracker.check(&actor, &mut spawner, &mut events), 1);
        assert_eq!(tracker.score(), 1);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        spawn_at(&mut spawner, 0.0, &mut events);

        assert_eq!(tracker.check(&actor, &mut spawner, &mut events), 1);
        assert!(spawner.pairs()[0].scored);
        for _ in 0..5 {
            assert_eq!(tracker.check(&actor, &mut spawner, &mut events), 0);
        }
        assert_eq!(tracker.score(), 1);
    }

    #[test]
    fn test_scoring_one_pair_leaves_other_untouched() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        let a = spawn_at(&mut spawner, 0.0, &mut events);
        let b = spawn_at(&mut spawner, 600.0, &mut events);
        // spawn_at shifted pair A another 1000px left; still behind the actor
        assert_eq!(tracker.check(&actor, &mut spawner, &mut events), 1);

        let pa = spawner.pairs().iter().find(|p| p.id == a).unwrap();
        let pb = spawner.pairs().iter().find(|p| p.id == b).unwrap();
        assert!(pa.scored);
        assert!(!pb.scored);
    }

    #[test]
    fn test_set_score_never_lowers() {
        let (mut tracker, _, _, mut events) = setup();
        tracker.set_score(5);
        tracker.set_score(2);
        assert_eq!(tracker.score(), 5);
        tracker.reset(&mut events);
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_score_updates_difficulty() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        tracker.set_score(39);
        spawn_at(&mut spawner, 0.0, &mut events);
        tracker.check(&actor, &mut spawner, &mut events);
        assert_eq!(spawner.difficulty().velocity_x, -230.0);
    }

    #[test]
    fn test_milestone_toggles_background() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        tracker.set_score(9);
        spawn_at(&mut spawner, 0.0, &mut events);
        events.clear();
        tracker.check(&actor, &mut spawner, &mut events);

        assert!(events.contains(&GameEvent::ScoreMilestone { score: 10 }));
        assert!(events.contains(&GameEvent::BackgroundChanged { day: false }));
        assert!(!tracker.background_day());

        tracker.reset(&mut events);
        assert!(tracker.background_day());
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_music_level_follows_thresholds() {
        let (mut tracker, actor, mut spawner, mut events) = setup();
        tracker.start_music(&mut events);
        assert_eq!(tracker.music_level(), 1);

        tracker.set_score(19);
        spawn_at(&mut spawner, 0.0, &mut events);
        tracker.check(&actor, &mut spawner, &mut events);
        assert_eq!(tracker.music_level(), 2);
        assert!(events.contains(&GameEvent::MusicLevelChanged { level: 2 }));

        tracker.stop_music(&mut events);
        assert_eq!(tracker.music_level(), 0);
    }
}
