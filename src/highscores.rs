//! High score persistence
//!
//! A single integer under one key, read once at startup and written only
//! when a run beats it. Storage failures are logged, never fatal.

use crate::persistence::Storage;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Parse a stored value; anything that is not a non-negative integer is `None`
pub fn parse_high_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[derive(Debug)]
pub struct HighScoreStore<S: Storage> {
    storage: S,
    best: u32,
}

impl<S: Storage> HighScoreStore<S> {
    /// Read the stored best score; missing or corrupt values count as 0
    pub fn load(storage: S) -> Self {
        let best = match storage.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => parse_high_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unparsable high score {raw:?}");
                0
            }),
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {e:#}");
                0
            }
        };
        if best > 0 {
            log::info!("Loaded high score {best}");
        }
        Self { storage, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Persist `score` if it beats the best; returns true on a new record
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.storage.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({score})"),
            Err(e) => log::warn!("Could not save high score {score}: {e:#}"),
        }
        true
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_value_is_zero() {
        let store = HighScoreStore::load(MemoryStorage::new());
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_corrupt_value_is_zero() {
        for raw in ["abc", "-4", "", "1.5"] {
            let store = HighScoreStore::load(MemoryStorage::with_value(HIGH_SCORE_KEY, raw));
            assert_eq!(store.best(), 0, "{raw:?}");
        }
    }

    #[test]
    fn test_loads_stored_value() {
        let store = HighScoreStore::load(MemoryStorage::with_value(HIGH_SCORE_KEY, "42"));
        assert_eq!(store.best(), 42);
    }

    #[test]
    fn test_writes_only_on_improvement() {
        let mut store = HighScoreStore::load(MemoryStorage::with_value(HIGH_SCORE_KEY, "10"));
        assert!(!store.record(5));
        assert!(!store.record(10));
        assert_eq!(store.storage().writes(), 0);

        assert!(store.record(11));
        assert_eq!(store.best(), 11);
        assert_eq!(store.storage().writes(), 1);
        assert_eq!(
            store.storage().get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("11")
        );
    }
}
