//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Horizontal control direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Which direction controls are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub left: bool,
    pub right: bool,
}

impl HeldControls {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }
}

/// A falling code symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    /// Baseline position; x never changes after spawn
    pub pos: Vec2,
    /// Fall distance per frame
    pub speed: f32,
    pub label: String,
    pub color: String,
    /// Set once on the first paddle hit, never cleared
    pub caught: bool,
    /// Opacity in [0, 1]; only decreases, and only once caught
    pub fade: f32,
}

impl FallingItem {
    /// Opacity to draw the item with
    pub fn opacity(&self) -> f32 {
        if self.caught { self.fade } else { 1.0 }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            x: config.centered_paddle_x(),
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    /// Apply one frame of movement for the held controls, staying in [0, max_x]
    pub fn steer(&mut self, held: HeldControls, step: f32, max_x: f32) {
        if held.left {
            self.x -= step;
        }
        if held.right {
            self.x += step;
        }
        self.x = self.x.clamp(0.0, max_x.max(0.0));
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete state of one game session (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u32,
    /// Countdown ticks left
    pub time_remaining: u32,
    /// False once time runs out or the session is stopped
    pub running: bool,
    pub paddle: Paddle,
    pub held: HeldControls,
    /// Live items in arrival order
    pub items: Vec<FallingItem>,
    /// Frames simulated so far
    pub frame_count: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a running session; the config is assumed validated
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            paddle: Paddle::centered(&config),
            time_remaining: config.session_secs,
            config,
            seed,
            score: 0,
            running: true,
            held: HeldControls::default(),
            items: Vec::new(),
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a randomly placed item above the playfield.
    ///
    /// Does nothing (returns `None`) once the session stopped or the item
    /// cap is reached.
    pub fn spawn_item(&mut self) -> Option<u32> {
        if !self.running || self.items.len() >= self.config.max_items {
            return None;
        }

        let cfg = &self.config;
        let lo = cfg.spawn_margin;
        let hi = cfg.width - cfg.spawn_margin;
        let x = self.rng.random_range(lo..hi);
        let speed = if cfg.speed_max > cfg.speed_min {
            self.rng.random_range(cfg.speed_min..cfg.speed_max)
        } else {
            cfg.speed_min
        };
        let label = cfg.symbols[self.rng.random_range(0..cfg.symbols.len())].clone();
        let color = cfg.colors[self.rng.random_range(0..cfg.colors.len())].clone();
        let spawn_y = cfg.spawn_y;

        let id = self.next_entity_id();
        self.items.push(FallingItem {
            id,
            pos: Vec2::new(x, spawn_y),
            speed,
            label,
            color,
            caught: false,
            fade: 1.0,
        });
        Some(id)
    }

    /// Place a specific item (scripted spawns and tests)
    pub fn push_item(&mut self, x: f32, speed: f32, label: &str, color: &str) -> u32 {
        let id = self.next_entity_id();
        self.items.push(FallingItem {
            id,
            pos: Vec2::new(x, self.config.spawn_y),
            speed,
            label: label.to_string(),
            color: color.to_string(),
            caught: false,
            fade: 1.0,
        });
        id
    }

    /// Record a held/released direction; takes effect on the next frame
    pub fn set_held(&mut self, direction: Direction, pressed: bool) {
        self.held.set(direction, pressed);
    }

    /// Stop physics, scoring and spawning. Returns false if already stopped.
    pub fn halt(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.held = HeldControls::default();
        was_running
    }

    pub fn item(&self, id: u32) -> Option<&FallingItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
