use crate::store::ScoreStore;
use anyhow::Result;
use tracing::warn;

pub const BEST_SCORE_KEY: &str = "bestScore";
pub const LAST_SCORE_KEY: &str = "lastScore";

/// Best and most recent final scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub best: u32,
    pub last: u32,
}

impl ScoreBoard {
    /// Read both scores. Absent or unparsable values count as 0.
    pub fn load(store: &dyn ScoreStore) -> Self {
        Self {
            best: read_score(store, BEST_SCORE_KEY),
            last: read_score(store, LAST_SCORE_KEY),
        }
    }

    /// Fold a finished game into the board. Returns true when it set a new
    /// best.
    pub fn record(&mut self, score: u32) -> bool {
        self.last = score;
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    /// Write `lastScore`, and `bestScore` only when it just improved.
    pub fn save(&self, store: &mut dyn ScoreStore, new_best: bool) -> Result<()> {
        if new_best {
            store.set(BEST_SCORE_KEY, &self.best.to_string())?;
        }
        store.set(LAST_SCORE_KEY, &self.last.to_string())
    }
}

fn read_score(store: &dyn ScoreStore, key: &str) -> u32 {
    let Some(raw) = store.get(key) else {
        return 0;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, "stored score is not a number, using 0");
        0
    })
}
