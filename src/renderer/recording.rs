//! Surface that records draw calls instead of painting them

use glam::Vec2;

use super::Surface;
use crate::sim::FallingItem;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Grid {
        spacing: f32,
    },
    Paddle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Flash {
        color: String,
        alpha: f32,
    },
    Item {
        id: u32,
        label: String,
        pos: Vec2,
        alpha: f32,
    },
}

/// Headless surface used by tests and the native demo
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Frames started (one per `clear`)
    pub frames: u64,
}

impl RecordingSurface {
    /// `(id, alpha)` of every item drawn since the last reset
    pub fn items_drawn(&self) -> Vec<(u32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Item { id, alpha, .. } => Some((*id, *alpha)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn grid(&mut self, _width: f32, _height: f32, spacing: f32) {
        self.commands.push(DrawCommand::Grid { spacing });
    }

    fn paddle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Paddle {
            x,
            y,
            width,
            height,
        });
    }

    fn flash(&mut self, color: &str, alpha: f32, _width: f32, _height: f32) {
        self.commands.push(DrawCommand::Flash {
            color: color.to_string(),
            alpha,
        });
    }

    fn item(&mut self, item: &FallingItem, alpha: f32) {
        self.commands.push(DrawCommand::Item {
            id: item.id,
            label: item.label.clone(),
            pos: item.pos,
            alpha,
        });
    }
}
