//! Game configuration
//!
//! Every tunable of the game lives in [`GameConfig`]. On the web a partial
//! JSON override can be stored in LocalStorage; missing fields fall back to
//! the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The symbol palette has no entries.
    #[error("symbol palette is empty")]
    NoSymbols,

    /// The color palette has no entries.
    #[error("color palette is empty")]
    NoColors,

    /// The fall speed range is empty or not positive.
    #[error("invalid speed range: {min}..{max}")]
    InvalidSpeedRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// The paddle does not fit inside the playfield.
    #[error("paddle width {paddle} does not fit playfield width {playfield}")]
    PaddleTooWide {
        /// Paddle width.
        paddle: f32,
        /// Playfield width.
        playfield: f32,
    },

    /// The playfield has no area.
    #[error("playfield must be positive, got {width}x{height}")]
    EmptyPlayfield {
        /// Playfield width.
        width: f32,
        /// Playfield height.
        height: f32,
    },

    /// Spawn margins leave no room to place items.
    #[error("spawn margin {margin} leaves no room in width {width}")]
    SpawnMarginTooWide {
        /// Margin on each side.
        margin: f32,
        /// Playfield width.
        width: f32,
    },

    /// A timer interval or the session length is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// Caught items would never fade out.
    #[error("fade step must be positive, got {0}")]
    InvalidFadeStep(f32),

    /// A length, speed or margin is NaN or infinite.
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    /// The JSON override could not be parsed.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of the end-of-session message table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTier {
    /// Lowest score that earns this message
    pub min_score: u32,
    pub message: String,
}

impl ScoreTier {
    pub fn new(min_score: u32, message: &str) -> Self {
        Self {
            min_score,
            message: message.to_string(),
        }
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's bottom edge and the playfield floor
    pub paddle_bottom_gap: f32,
    /// Travel per frame per held direction
    pub paddle_step: f32,

    // === Timing ===
    pub spawn_interval_ms: u32,
    pub countdown_interval_ms: u32,
    /// Session length in countdown ticks (seconds with the default interval)
    pub session_secs: u32,

    // === Items ===
    pub symbols: Vec<String>,
    pub colors: Vec<String>,
    pub speed_min: f32,
    pub speed_max: f32,
    pub catch_margin: f32,
    pub spawn_margin: f32,
    pub spawn_y: f32,
    pub miss_margin: f32,
    pub item_half_height: f32,
    pub fade_step: f32,
    pub max_items: usize,

    // === Summary ===
    /// Checked highest first; the first tier the score reaches wins
    pub tiers: Vec<ScoreTier>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_gap: PADDLE_BOTTOM_GAP,
            paddle_step: PADDLE_STEP,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            session_secs: SESSION_SECS,

            symbols: ["{ }", "< >", "//", "=>", "( )", "[ ]", "&&", "||", "!=", "++"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            colors: ["#00e89d", "#7b61ff", "#ff6b9d", "#ffd93d", "#6bddff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            catch_margin: CATCH_MARGIN,
            spawn_margin: SPAWN_MARGIN,
            spawn_y: SPAWN_Y,
            miss_margin: MISS_MARGIN,
            item_half_height: ITEM_HALF_HEIGHT,
            fade_step: FADE_STEP,
            max_items: MAX_ITEMS,

            tiers: vec![
                ScoreTier::new(20, "You're a coding legend!"),
                ScoreTier::new(10, "Nice catch!"),
                ScoreTier::new(0, "Keep practicing!"),
            ],
        }
    }
}

impl GameConfig {
    /// LocalStorage key for overrides
    pub const STORAGE_KEY: &'static str = "code_catcher_config";

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        // JSON numbers beyond f32 range deserialize as infinity
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("paddle width", self.paddle_width),
            ("paddle height", self.paddle_height),
            ("paddle bottom gap", self.paddle_bottom_gap),
            ("paddle step", self.paddle_step),
            ("minimum speed", self.speed_min),
            ("maximum speed", self.speed_max),
            ("catch margin", self.catch_margin),
            ("spawn margin", self.spawn_margin),
            ("spawn y", self.spawn_y),
            ("miss margin", self.miss_margin),
            ("item half height", self.item_half_height),
            ("fade step", self.fade_step),
            ("speed range", self.speed_max - self.speed_min),
            ("spawn span", self.width - 2.0 * self.spawn_margin),
        ];
        if let Some(&(name, _)) = lengths.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite(name));
        }

        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::EmptyPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.paddle_width > 0.0 && self.paddle_width <= self.width) {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                playfield: self.width,
            });
        }
        if !(self.spawn_margin >= 0.0 && self.spawn_margin * 2.0 < self.width) {
            return Err(ConfigError::SpawnMarginTooWide {
                margin: self.spawn_margin,
                width: self.width,
            });
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.colors.is_empty() {
            return Err(ConfigError::NoColors);
        }
        if !(self.speed_min > 0.0 && self.speed_min <= self.speed_max) {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.speed_min,
                max: self.speed_max,
            });
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("spawn interval"));
        }
        if self.countdown_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("countdown interval"));
        }
        if self.session_secs == 0 {
            return Err(ConfigError::ZeroDuration("session length"));
        }
        if !(self.fade_step > 0.0) {
            return Err(ConfigError::InvalidFadeStep(self.fade_step));
        }
        Ok(())
    }

    /// Paddle x that centers it in the playfield
    pub fn centered_paddle_x(&self) -> f32 {
        (self.width - self.paddle_width) / 2.0
    }

    /// Rightmost paddle x
    pub fn max_paddle_x(&self) -> f32 {
        self.width - self.paddle_width
    }

    /// Top edge of the paddle
    pub fn paddle_top(&self) -> f32 {
        self.height - self.paddle_height - self.paddle_bottom_gap
    }

    /// Frames a caught item stays visible, counting the catch frame
    pub fn fade_frames(&self) -> u32 {
        (1.0 / self.fade_step).ceil() as u32
    }

    /// Load overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(json) = crate::platform::storage::get_item(Self::STORAGE_KEY) else {
            log::info!("Using default game config");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded game config override from LocalStorage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring stored game config: {}", e);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.centered_paddle_x(), 230.0);
        assert_eq!(config.max_paddle_x(), 460.0);
        assert_eq!(config.paddle_top(), 371.0);
        assert_eq!(config.fade_frames(), 13);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "session_secs": 10, "speed_max": 8.0 }"#)
            .expect("override should parse");
        assert_eq!(config.session_secs, 10);
        assert_eq!(config.speed_max, 8.0);
        assert_eq!(config.width, PLAYFIELD_WIDTH);
        assert_eq!(config.symbols.len(), 10);
        assert_eq!(config.tiers.len(), 3);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_unplayable_configs() {
        let config = GameConfig {
            symbols: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoSymbols)));

        let config = GameConfig {
            speed_min: 6.0,
            speed_max: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));

        let config = GameConfig {
            paddle_width: 600.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooWide { .. })
        ));

        let config = GameConfig {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration("spawn interval"))
        ));

        let config = GameConfig {
            fade_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFadeStep(_))));
    }

    #[test]
    fn test_out_of_range_numbers_are_rejected() {
        // 1e39 overflows f32 and parses as infinity
        let err = GameConfig::from_json(r#"{ "speed_max": 1e39 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite("maximum speed")));

        let err = GameConfig::from_json(r#"{ "width": 1e39 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite("width")));

        let config = GameConfig {
            spawn_y: f32::NEG_INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite("spawn y"))));

        let config = GameConfig {
            fade_step: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite("fade step"))));
    }

    #[test]
    fn test_huge_but_finite_ranges_are_rejected() {
        let config = GameConfig {
            speed_min: -f32::MAX,
            speed_max: f32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("speed range"))
        ));

        let config = GameConfig {
            width: f32::MAX,
            spawn_margin: -f32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("spawn span"))
        ));
    }

    #[test]
    fn test_invalid_override_is_rejected_after_parse() {
        let err = GameConfig::from_json(r#"{ "colors": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoColors));
        assert_eq!(err.to_string(), "color palette is empty");
    }
}
