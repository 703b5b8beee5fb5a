//! Secret key sequence detection
//!
//! ↑↑↓↓←→←→BA opens the game.

use std::collections::VecDeque;

/// The Konami code, as browser `KeyboardEvent.key` values
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Lowercase single-character keys; named keys pass through
pub fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => key.to_string(),
    }
}

/// Watches key presses for a fixed sequence.
///
/// Matches against the most recent presses, so stray keys before the
/// sequence (an extra `ArrowUp`, say) don't spoil it.
#[derive(Debug, Clone)]
pub struct SequenceDetector {
    sequence: Vec<String>,
    recent: VecDeque<String>,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new(&KONAMI_CODE)
    }
}

impl SequenceDetector {
    pub fn new(sequence: &[&str]) -> Self {
        Self {
            sequence: sequence.iter().map(|k| normalize_key(k)).collect(),
            recent: VecDeque::with_capacity(sequence.len()),
        }
    }

    /// Feed one key press; returns true when it completes the sequence
    pub fn feed(&mut self, key: &str) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        if self.recent.len() == self.sequence.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(normalize_key(key));

        if self.recent.iter().eq(self.sequence.iter()) {
            self.recent.clear();
            true
        } else {
            false
        }
    }

    /// Forget partial progress
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(detector: &mut SequenceDetector, keys: &[&str]) -> Vec<bool> {
        keys.iter().map(|k| detector.feed(k)).collect()
    }

    #[test]
    fn test_detects_konami_code() {
        let mut detector = SequenceDetector::default();
        let hits = feed_all(&mut detector, &KONAMI_CODE);
        assert_eq!(hits.iter().filter(|h| **h).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn test_uppercase_letters_count() {
        let mut detector = SequenceDetector::default();
        let mut keys = KONAMI_CODE.to_vec();
        keys[8] = "B";
        keys[9] = "A";
        assert!(*feed_all(&mut detector, &keys).last().unwrap());
    }

    #[test]
    fn test_stray_leading_keys_do_not_spoil_sequence() {
        let mut detector = SequenceDetector::default();
        feed_all(&mut detector, &["ArrowUp", "x", "ArrowUp"]);
        assert!(*feed_all(&mut detector, &KONAMI_CODE).last().unwrap());
    }

    #[test]
    fn test_interrupted_sequence_fails() {
        let mut detector = SequenceDetector::default();
        let mut keys = KONAMI_CODE.to_vec();
        keys.insert(5, "Enter");
        assert!(feed_all(&mut detector, &keys).iter().all(|h| !h));
    }

    #[test]
    fn test_match_clears_history() {
        let mut detector = SequenceDetector::default();
        feed_all(&mut detector, &KONAMI_CODE);
        // A lone "a" right after a match must not retrigger
        assert!(!detector.feed("a"));
        assert!(*feed_all(&mut detector, &KONAMI_CODE).last().unwrap());
    }

    #[test]
    fn test_reset_drops_progress() {
        let mut detector = SequenceDetector::default();
        feed_all(&mut detector, &KONAMI_CODE[..9]);
        detector.reset();
        assert!(!detector.feed("a"));
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("B"), "b");
        assert_eq!(normalize_key("ArrowUp"), "ArrowUp");
        assert_eq!(normalize_key(""), "");
    }
}
