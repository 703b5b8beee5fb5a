//! Canvas 2D implementation of [`Surface`]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::renderer::Surface;
use crate::sim::FallingItem;

const ACCENT: &str = "#00e89d";
const ACCENT_2: &str = "#7b61ff";
const GRID_COLOR: &str = "rgba(0, 232, 157, 0.04)";
const ITEM_FONT: &str = "bold 18px \"IBM Plex Mono\", monospace";
/// Labels are drawn left of the item's x so short symbols sit centered
const LABEL_OFFSET_X: f64 = 12.0;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Set after the first failed draw call so a broken context logs once
    draw_failed: bool,
}

impl CanvasSurface {
    /// Size the canvas to the logical playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32) -> Result<Self, JsValue> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        Ok(Self {
            ctx,
            draw_failed: false,
        })
    }

    /// Trace a rounded rectangle path
    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = r.min(w / 2.0).min(h / 2.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r)?;
        ctx.arc_to(x + w, y + h, x, y + h, r)?;
        ctx.arc_to(x, y + h, x, y, r)?;
        ctx.arc_to(x, y, x + w, y, r)?;
        ctx.close_path();
        Ok(())
    }

    fn paddle_path(&self, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        let gradient = self.ctx.create_linear_gradient(x, 0.0, x + w, 0.0);
        gradient.add_color_stop(0.0, ACCENT)?;
        gradient.add_color_stop(1.0, ACCENT_2)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.rounded_rect(x, y, w, h, h / 2.0)
    }

    fn check(&mut self, what: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            if !self.draw_failed {
                log::warn!("Canvas {} failed: {:?}", what, e);
                self.draw_failed = true;
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn grid(&mut self, width: f32, height: f32, spacing: f32) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);

        let (w, h, step) = (width as f64, height as f64, spacing as f64);
        let mut x = 0.0;
        while x < w {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, h);
            ctx.stroke();
            x += step;
        }
        let mut y = 0.0;
        while y < h {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(w, y);
            ctx.stroke();
            y += step;
        }
    }

    fn paddle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);
        self.ctx.set_shadow_color(ACCENT);
        self.ctx.set_shadow_blur(15.0);
        let traced = self.paddle_path(x, y, w, h);
        if traced.is_ok() {
            self.ctx.fill();
        }
        self.ctx.set_shadow_blur(0.0);
        self.check("paddle", traced);
    }

    fn flash(&mut self, color: &str, alpha: f32, width: f32, height: f32) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        self.ctx.set_global_alpha(1.0);
    }

    fn item(&mut self, item: &FallingItem, alpha: f32) {
        let ctx = &self.ctx;
        ctx.set_font(ITEM_FONT);
        ctx.set_fill_style_str(&item.color);
        ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        ctx.set_shadow_color(&item.color);
        ctx.set_shadow_blur(8.0);
        let drawn = ctx.fill_text(
            &item.label,
            item.pos.x as f64 - LABEL_OFFSET_X,
            item.pos.y as f64,
        );
        ctx.set_shadow_blur(0.0);
        ctx.set_global_alpha(1.0);
        self.check("item text", drawn);
    }
}
