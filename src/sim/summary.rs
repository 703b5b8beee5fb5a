//! End-of-session summary

use serde::{Deserialize, Serialize};

use crate::config::ScoreTier;

/// Shown when the countdown runs out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub message: String,
    /// Leaderboard rank (1-indexed) if the run qualified
    pub rank: Option<usize>,
}

impl SessionSummary {
    /// Build a summary purely from the final score
    pub fn from_score(score: u32, tiers: &[ScoreTier]) -> Self {
        Self {
            score,
            message: tier_message(score, tiers).to_string(),
            rank: None,
        }
    }
}

/// Message of the highest tier the score reaches
pub fn tier_message(score: u32, tiers: &[ScoreTier]) -> &str {
    tiers
        .iter()
        .filter(|tier| score >= tier.min_score)
        .max_by_key(|tier| tier.min_score)
        .map(|tier| tier.message.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_default_tiers() {
        let tiers = GameConfig::default().tiers;
        assert_eq!(tier_message(0, &tiers), "Keep practicing!");
        assert_eq!(tier_message(9, &tiers), "Keep practicing!");
        assert_eq!(tier_message(10, &tiers), "Nice catch!");
        assert_eq!(tier_message(19, &tiers), "Nice catch!");
        assert_eq!(tier_message(20, &tiers), "You're a coding legend!");
        assert_eq!(tier_message(500, &tiers), "You're a coding legend!");
    }

    #[test]
    fn test_tier_order_does_not_matter() {
        let tiers = vec![
            ScoreTier::new(0, "low"),
            ScoreTier::new(5, "high"),
            ScoreTier::new(2, "mid"),
        ];
        assert_eq!(tier_message(3, &tiers), "mid");
        assert_eq!(tier_message(7, &tiers), "high");
    }

    #[test]
    fn test_no_matching_tier_gives_empty_message() {
        let tiers = vec![ScoreTier::new(5, "high")];
        let summary = SessionSummary::from_score(1, &tiers);
        assert_eq!(summary.message, "");
        assert_eq!(summary.rank, None);
    }
}
