//! Best Code Catcher runs
//!
//! The board keeps the ten best finished runs, best first. A run is filed once
//! when its countdown expires; filing stamps the summary with the rank it
//! earned and persists the board if it placed.

use serde::{Deserialize, Serialize};

use crate::sim::SessionSummary;

/// A finished run that made the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Symbols caught
    pub score: u32,
    /// Unix time (ms) the countdown ran out
    pub finished_at: f64,
}

/// Leaderboard, best run first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    runs: Vec<Run>,
}

impl HighScores {
    /// Runs kept on the board
    pub const CAPACITY: usize = 10;
    pub const STORAGE_KEY: &'static str = "code_catcher_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a board from stored runs, dropping empty runs and restoring
    /// order and capacity in case the stored copy was edited by hand
    pub fn from_runs(mut runs: Vec<Run>) -> Self {
        runs.retain(|run| run.score > 0);
        // Stable sort keeps older runs ahead of equal newer ones
        runs.sort_by(|a, b| b.score.cmp(&a.score));
        runs.truncate(Self::CAPACITY);
        Self { runs }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Best score on the board
    pub fn best(&self) -> Option<u32> {
        self.runs.first().map(|run| run.score)
    }

    /// Rank (1-based) `score` would earn, without recording it.
    ///
    /// Scoring nothing never places, and a run tying an existing one ranks
    /// below it.
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.runs.partition_point(|run| run.score >= score);
        (slot < Self::CAPACITY).then_some(slot + 1)
    }

    /// Record a run and return the rank it took
    pub fn record(&mut self, score: u32, finished_at: f64) -> Option<usize> {
        let rank = self.rank_for(score)?;
        self.runs.insert(rank - 1, Run { score, finished_at });
        self.runs.truncate(Self::CAPACITY);
        Some(rank)
    }

    /// File a finished session: stamp its summary with the earned rank and
    /// persist the board when the run placed
    pub fn file(&mut self, summary: &mut SessionSummary, finished_at: f64) -> Option<usize> {
        summary.rank = self.record(summary.score, finished_at);
        match summary.rank {
            Some(rank) => {
                log::info!("Score {} placed #{}", summary.score, rank);
                self.save();
            }
            None => log::debug!("Score {} did not place", summary.score),
        }
        summary.rank
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Some(stored) => {
                let board = Self::from_runs(stored.runs);
                log::info!("Loaded {} high scores", board.runs.len());
                board
            }
            None => Self::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if !crate::platform::storage::save_json(Self::STORAGE_KEY, self) {
            log::warn!("High scores not saved");
        }
    }

    /// Native builds keep the board in memory only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
