//! Paddle catch detection
//!
//! An item is caught when its catch point (baseline plus half height) lies in
//! the paddle's vertical band and its x is within the paddle's reach.

use glam::Vec2;

use super::state::Paddle;
use crate::config::GameConfig;

/// Region of the playfield where an item's catch point counts as a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    /// Offset from an item's baseline to its catch point
    pub item_offset: f32,
}

impl CatchZone {
    pub fn new(paddle: &Paddle, config: &GameConfig) -> Self {
        let top = config.paddle_top();
        Self {
            top,
            bottom: top + paddle.height,
            left: paddle.x - config.catch_margin,
            right: paddle.right() + config.catch_margin,
            item_offset: config.item_half_height,
        }
    }

    /// Check whether an item at `pos` (baseline) touches the paddle
    pub fn catches(&self, pos: Vec2) -> bool {
        let catch_y = pos.y + self.item_offset;
        catch_y >= self.top && catch_y <= self.bottom && pos.x >= self.left && pos.x <= self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> CatchZone {
        let config = GameConfig::default();
        CatchZone::new(&Paddle::centered(&config), &config)
    }

    #[test]
    fn test_zone_geometry() {
        let zone = zone();
        assert_eq!(zone.top, 371.0);
        assert_eq!(zone.bottom, 385.0);
        assert_eq!(zone.left, 220.0);
        assert_eq!(zone.right, 340.0);
    }

    #[test]
    fn test_center_hit() {
        assert!(zone().catches(Vec2::new(280.0, 360.0)));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let zone = zone();
        assert!(zone.catches(Vec2::new(220.0, 356.0)));
        assert!(zone.catches(Vec2::new(340.0, 370.0)));
    }

    #[test]
    fn test_outside_reach_misses() {
        let zone = zone();
        assert!(!zone.catches(Vec2::new(219.0, 360.0)));
        assert!(!zone.catches(Vec2::new(341.0, 360.0)));
    }

    #[test]
    fn test_above_or_below_band_misses() {
        let zone = zone();
        assert!(!zone.catches(Vec2::new(280.0, 355.0)));
        assert!(!zone.catches(Vec2::new(280.0, 371.0)));
    }
}
