// Cover layer backed by a 2d canvas. Erasing uses `destination-out`, so only
// the canvas itself loses pixels; content stacked beneath it is untouched.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{CoverLayer, coverage};
use crate::config::CoverStyle;
use crate::error::SurfaceError;
use crate::state::Point;
use crate::util::cwarn;

pub struct CanvasLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasLayer {
    pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::ContextUnavailable(format!("{e:?}")))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable("not a 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }

    fn eraser(&self) {
        if self.ctx.set_global_composite_operation("destination-out").is_err() {
            cwarn("destination-out unsupported");
        }
        self.ctx.set_fill_style_str("#000");
        self.ctx.set_stroke_style_str("#000");
    }
}

impl CoverLayer for CanvasLayer {
    fn raster_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn paint_cover(
        &mut self,
        style: &CoverStyle,
        scale: f64,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<(), SurfaceError> {
        let ctx = &self.ctx;
        let (w, h) = self.raster_size();
        let (w, h) = (w as f64, h as f64);
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?;
        ctx.set_global_composite_operation("source-over")
            .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?;
        ctx.clear_rect(0.0, 0.0, w, h);

        let gradient = ctx.create_linear_gradient(0.0, 0.0, w, h);
        for (offset, stop) in [0.0f32, 0.5, 1.0].into_iter().zip(style.stops.iter()) {
            gradient
                .add_color_stop(offset, &stop.css())
                .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?;
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", style.dot_opacity));
        let spread = style.dot_max_radius - style.dot_min_radius;
        for _ in 0..style.dot_count {
            let x = rng() * w;
            let y = rng() * h;
            let r = (rng() * spread + style.dot_min_radius) * scale;
            ctx.begin_path();
            ctx.arc(x, y, r, 0.0, std::f64::consts::PI * 2.0)
                .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?;
            ctx.fill();
        }

        ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", style.label_opacity));
        ctx.set_font(&format!("600 {}px 'Poppins', sans-serif", style.label_px * scale));
        ctx.set_text_align("center");
        ctx.fill_text(&style.label, w / 2.0, h / 2.0)
            .map_err(|e| SurfaceError::Draw(format!("{e:?}")))?;
        Ok(())
    }

    fn erase_disc(&mut self, center: Point, radius: f64) {
        self.eraser();
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0).is_ok() {
            self.ctx.fill();
        }
    }

    fn erase_segment(&mut self, from: Point, to: Point, width: f64) {
        self.eraser();
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn sample_coverage(&self, stride: usize) -> Result<f64, SurfaceError> {
        let (w, h) = self.raster_size();
        if w == 0 || h == 0 {
            return Err(SurfaceError::EmptyRaster);
        }
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(|e| SurfaceError::ReadBack(format!("{e:?}")))?
            .data();
        coverage::sampled_coverage(&data, stride).ok_or(SurfaceError::EmptyRaster)
    }
}
