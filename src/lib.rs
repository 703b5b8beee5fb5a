//! Code Catcher - a hidden falling-symbol mini-game
//!
//! Core modules:
//! - `sim`: Deterministic game state and per-frame/per-tick algorithms
//! - `session`: One running game with its spawn and countdown tickers
//! - `arcade`: Controller owning the (at most one) open session
//! - `activation`: Key sequence detector that opens the game
//! - `renderer`: 2D drawing surface abstraction
//! - `platform`: Browser glue (canvas, overlay, animation frames, storage)

pub mod activation;
pub mod arcade;
pub mod config;
pub mod highscores;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use arcade::{Arcade, KeyOutcome};
pub use config::{ConfigError, GameConfig, ScoreTier};
pub use highscores::HighScores;
pub use session::{FrameStatus, Session, SessionEvent};

/// Game configuration defaults
pub mod consts {
    /// Logical playfield size
    pub const PLAYFIELD_WIDTH: f32 = 560.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Paddle defaults - sits near the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_BOTTOM_GAP: f32 = 15.0;
    /// Horizontal paddle travel per frame while a direction is held
    pub const PADDLE_STEP: f32 = 7.0;

    /// Timers
    pub const SPAWN_INTERVAL_MS: u32 = 600;
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;
    pub const SESSION_SECS: u32 = 30;

    /// Item fall speed range (units per frame)
    pub const SPEED_MIN: f32 = 2.0;
    pub const SPEED_MAX: f32 = 5.0;

    /// Extra horizontal reach of the paddle on each side
    pub const CATCH_MARGIN: f32 = 10.0;
    /// Keeps spawned items away from the side walls
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Items start just above the visible area
    pub const SPAWN_Y: f32 = -20.0;
    /// How far below the playfield an item falls before it counts as missed
    pub const MISS_MARGIN: f32 = 20.0;
    /// Distance from an item's baseline to its catch point
    pub const ITEM_HALF_HEIGHT: f32 = 15.0;

    /// Opacity lost per frame once caught (13 frames to vanish)
    pub const FADE_STEP: f32 = 0.08;

    /// Hard cap on live items
    pub const MAX_ITEMS: usize = 64;

    /// Background grid spacing
    pub const GRID_SPACING: f32 = 40.0;
    /// Opacity of the full-playfield wash drawn when an item is caught
    pub const CATCH_FLASH_ALPHA: f32 = 0.3;

    /// Longest gap between two frames fed to the tickers (ms)
    pub const MAX_FRAME_GAP_MS: f64 = 1000.0;
}
