//! Game state and core simulation types
//!
//! All mutable gameplay state lives in one [`Session`] aggregate that the
//! phase handlers receive by `&mut`. Nothing here is shared or global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::CollisionKind;
use super::listeners::{InputListeners, Scheduler};
use super::scoring::ScoreTracker;
use super::spawner::{ObstacleSpawner, ObstaclePair};
use crate::tuning::GameConfig;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, waiting for the start input
    PreStart,
    /// Active gameplay
    Running,
    /// Run ended, tableau frozen until restart
    GameOver,
    /// Suspended by focus/visibility loss
    Paused,
}

impl GamePhase {
    pub const COUNT: usize = 4;
    pub const ALL: [GamePhase; Self::COUNT] = [
        GamePhase::PreStart,
        GamePhase::Running,
        GamePhase::GameOver,
        GamePhase::Paused,
    ];

    /// Slot in a phase-indexed table
    pub const fn index(self) -> usize {
        match self {
            GamePhase::PreStart => 0,
            GamePhase::Running => 1,
            GamePhase::GameOver => 2,
            GamePhase::Paused => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::PreStart => "prestart",
            GamePhase::Running => "running",
            GamePhase::GameOver => "gameover",
            GamePhase::Paused => "paused",
        }
    }
}

/// Presentation events emitted by the core
///
/// Rendering and audio collaborators drain these after each call into the
/// simulation. They never feed back into gameplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseEntered(GamePhase),
    PhaseExited(GamePhase),
    /// Start input accepted; gameplay begins after the start delay
    StartCue,
    Flapped,
    ScoreChanged { score: u32 },
    /// Every `milestone_interval` points
    ScoreMilestone { score: u32 },
    BackgroundChanged { day: bool },
    MusicLevelChanged { level: u8 },
    CollisionOccurred(CollisionKind),
    PairCreated(ObstaclePair),
    /// Final geometry of a pair leaving the playfield
    PairRetired(ObstaclePair),
    PairsCleared,
    HighScoreChanged { high_score: u32 },
}

/// The single owned aggregate of session state
#[derive(Debug)]
pub struct Session {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub actor: Actor,
    pub spawner: ObstacleSpawner,
    pub scores: ScoreTracker,
    /// Best score known to the session (loaded from storage at startup)
    pub high_score: u32,
    /// New record waiting to be persisted by the owner of the storage
    pub pending_high_score: Option<u32>,
    pub listeners: InputListeners,
    pub scheduler: Scheduler,
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Create a session with the given tuning, seed and stored high score
    pub fn new(config: GameConfig, seed: u64, high_score: u32) -> Self {
        Self {
            actor: Actor::new(&config.actor),
            spawner: ObstacleSpawner::new(config.difficulty.clone(), config.playfield.clone()),
            scores: ScoreTracker::new(&config.timing),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            high_score,
            pending_high_score: None,
            listeners: InputListeners::default(),
            scheduler: Scheduler::default(),
            events: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    /// Fold the current score into the high score; returns true on a new record
    pub fn commit_high_score(&mut self) -> bool {
        let score = self.scores.score();
        if score > self.high_score {
            self.high_score = score;
            self.pending_high_score = Some(score);
            self.events.push(GameEvent::HighScoreChanged { high_score: score });
            true
        } else {
            false
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_indices_are_distinct() {
        for (i, phase) in GamePhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_commit_high_score_only_on_improvement() {
        let mut session = Session::new(GameConfig::default(), 1, 5);
        assert!(!session.commit_high_score());
        assert_eq!(session.pending_high_score, None);

        session.scores.set_score(7);
        assert!(session.commit_high_score());
        assert_eq!(session.high_score, 7);
        assert_eq!(session.pending_high_score, Some(7));
        assert!(!session.commit_high_score());
    }

    #[test]
    fn test_same_seed_same_rng() {
        use rand::Rng;
        let mut a = Session::new(GameConfig::default(), 42, 0);
        let mut b = Session::new(GameConfig::default(), 42, 0);
        let x: u32 = a.rng.random();
        let y: u32 = b.rng.random();
        assert_eq!(x, y);
    }
}
