//! 2D rendering
//!
//! The game draws through the [`Surface`] trait so the same frame code runs
//! against a browser canvas or a command recorder.

pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use crate::consts::{CATCH_FLASH_ALPHA, GRID_SPACING};
use crate::sim::{FallingItem, FrameReport, GameSession};

/// Minimal drawing API needed by the game
pub trait Surface {
    /// Wipe the whole playfield
    fn clear(&mut self, width: f32, height: f32);
    /// Faint background grid
    fn grid(&mut self, width: f32, height: f32, spacing: f32);
    fn paddle(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Full-playfield color wash
    fn flash(&mut self, color: &str, alpha: f32, width: f32, height: f32);
    /// Draw an item at its position with the given opacity
    fn item(&mut self, item: &FallingItem, alpha: f32);
}

/// Paint the current state. Only live items are drawn.
pub fn draw_frame(state: &GameSession, report: &FrameReport, surface: &mut dyn Surface) {
    let cfg = &state.config;

    surface.clear(cfg.width, cfg.height);
    surface.grid(cfg.width, cfg.height, GRID_SPACING);
    surface.paddle(
        state.paddle.x,
        cfg.paddle_top(),
        state.paddle.width,
        state.paddle.height,
    );

    for catch in &report.caught {
        surface.flash(&catch.color, CATCH_FLASH_ALPHA, cfg.width, cfg.height);
    }

    for item in &state.items {
        surface.item(item, item.opacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::frame;

    #[test]
    fn test_draw_order() {
        let mut state = GameSession::new(GameConfig::default(), 3);
        state.push_item(100.0, 2.0, "{ }", "#00e89d");
        let report = frame(&mut state);

        let mut surface = RecordingSurface::default();
        draw_frame(&state, &report, &mut surface);

        assert!(matches!(surface.commands[0], DrawCommand::Clear));
        assert!(matches!(surface.commands[1], DrawCommand::Grid { .. }));
        assert_eq!(
            surface.commands[2],
            DrawCommand::Paddle {
                x: 230.0,
                y: 371.0,
                width: 100.0,
                height: 14.0
            }
        );
        assert_eq!(surface.items_drawn().len(), 1);
    }

    #[test]
    fn test_caught_item_flashes_and_fades() {
        let mut state = GameSession::new(GameConfig::default(), 3);
        let id = state.push_item(280.0, 5.0, "=>", "#ff6b9d");
        let mut surface = RecordingSurface::default();

        let mut report = FrameReport::default();
        while report.caught.is_empty() {
            report = frame(&mut state);
        }
        draw_frame(&state, &report, &mut surface);

        assert!(surface.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Flash { color, .. } if color == "#ff6b9d"
        )));
        let drawn = surface.items_drawn();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0, id);
        assert!(drawn[0].1 < 1.0 && drawn[0].1 > 0.9);
    }

    #[test]
    fn test_removed_item_is_never_drawn() {
        let mut state = GameSession::new(GameConfig::default(), 3);
        let id = state.push_item(10.0, 5.0, "//", "#6bddff");
        let mut surface = RecordingSurface::default();

        loop {
            surface.commands.clear();
            let report = frame(&mut state);
            draw_frame(&state, &report, &mut surface);
            if !report.removed.is_empty() {
                assert!(surface.items_drawn().iter().all(|(drawn, _)| *drawn != id));
                break;
            }
            assert_eq!(surface.items_drawn().len(), 1);
        }
    }
}
