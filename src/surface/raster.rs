// In-memory RGBA8 cover. Same erase semantics as the canvas layer
// (destination-out with an opaque brush): covered pixels go fully clear,
// nothing is ever repainted until the next `paint_cover`.

use super::{CoverLayer, coverage};
use crate::config::{CoverStyle, Rgb};
use crate::error::SurfaceError;
use crate::state::Point;

#[derive(Clone, Debug)]
pub struct SoftRaster {
    width: u32,
    height: u32,
    /// Row-major RGBA8, length = width * height * 4.
    rgba: Vec<u8>,
}

impl SoftRaster {
    /// A fully transparent raster; call `paint_cover` to make it opaque.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * coverage::BYTES_PER_PIXEL],
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.rgba[self.index(x, y) + 3])
    }

    pub fn clear_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.rgba[i..i + 4].fill(0);
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * coverage::BYTES_PER_PIXEL
    }

    /// Clears every pixel whose center lies within `reach` of the segment
    /// `a`-`b` (a disc when `a == b`).
    fn clear_capsule(&mut self, a: Point, b: Point, reach: f64) {
        if !(reach > 0.0) || !a.is_finite() || !b.is_finite() {
            return;
        }
        let min_x = (a.x.min(b.x) - reach).floor().max(0.0);
        let min_y = (a.y.min(b.y) - reach).floor().max(0.0);
        let max_x = (a.x.max(b.x) + reach).ceil().min(self.width as f64);
        let max_y = (a.y.max(b.y) + reach).ceil().min(self.height as f64);
        if min_x >= max_x || min_y >= max_y {
            return;
        }
        let reach2 = reach * reach;
        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let c = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if dist2_to_segment(c, a, b) <= reach2 {
                    self.clear_pixel(x, y);
                }
            }
        }
    }
}

fn dist2_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    (p.x - cx).powi(2) + (p.y - cy).powi(2)
}

fn blend(dst: u8, src: u8, a: f64) -> u8 {
    (dst as f64 + (src as f64 - dst as f64) * a).round() as u8
}

impl CoverLayer for SoftRaster {
    fn raster_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = SoftRaster::new(width, height);
    }

    // The instructional label is glyph work left to the canvas; it is
    // translucent over an opaque fill so it never changes alpha.
    fn paint_cover(
        &mut self,
        style: &CoverStyle,
        scale: f64,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<(), SurfaceError> {
        let (w, h) = (self.width as f64, self.height as f64);
        let diag2 = (w * w + h * h).max(f64::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let c = style.gradient_at((px * w + py * h) / diag2);
                let i = self.index(x, y);
                self.rgba[i..i + 4].copy_from_slice(&[c.r, c.g, c.b, 255]);
            }
        }
        let spread = style.dot_max_radius - style.dot_min_radius;
        for _ in 0..style.dot_count {
            let cx = rng() * w;
            let cy = rng() * h;
            let r = (rng() * spread + style.dot_min_radius) * scale;
            self.tint_disc(Point::new(cx, cy), r, Rgb::WHITE, style.dot_opacity);
        }
        Ok(())
    }

    fn erase_disc(&mut self, center: Point, radius: f64) {
        self.clear_capsule(center, center, radius);
    }

    fn erase_segment(&mut self, from: Point, to: Point, width: f64) {
        self.clear_capsule(from, to, width / 2.0);
    }

    fn sample_coverage(&self, stride: usize) -> Result<f64, SurfaceError> {
        coverage::sampled_coverage(&self.rgba, stride).ok_or(SurfaceError::EmptyRaster)
    }
}

impl SoftRaster {
    /// Source-over of a translucent color; opaque pixels stay opaque.
    fn tint_disc(&mut self, center: Point, radius: f64, color: Rgb, opacity: f64) {
        if !(radius > 0.0) || !center.is_finite() {
            return;
        }
        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = ((center.x + radius).ceil().max(0.0) as u32).min(self.width);
        let max_y = ((center.y + radius).ceil().max(0.0) as u32).min(self.height);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let (dx, dy) = (x as f64 + 0.5 - center.x, y as f64 + 0.5 - center.y);
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let i = self.index(x, y);
                if self.rgba[i + 3] == 0 {
                    continue;
                }
                self.rgba[i] = blend(self.rgba[i], color.r, opacity);
                self.rgba[i + 1] = blend(self.rgba[i + 1], color.g, opacity);
                self.rgba[i + 2] = blend(self.rgba[i + 2], color.b, opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut s = seed;
        move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (s >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn painted(w: u32, h: u32) -> SoftRaster {
        let mut r = SoftRaster::new(w, h);
        r.paint_cover(&CoverStyle::default(), 1.0, &mut lcg(7)).unwrap();
        r
    }

    #[test]
    fn paint_is_fully_opaque() {
        let r = painted(40, 30);
        assert!(r.pixels().chunks(4).all(|px| px[3] == 255));
        assert_eq!(r.sample_coverage(1), Ok(0.0));
    }

    #[test]
    fn gradient_runs_corner_to_corner() {
        let style = CoverStyle {
            dot_count: 0,
            ..CoverStyle::default()
        };
        let mut r = SoftRaster::new(200, 200);
        r.paint_cover(&style, 1.0, &mut lcg(1)).unwrap();
        let px = |x: u32, y: u32| {
            let i = r.index(x, y);
            Rgb { r: r.pixels()[i], g: r.pixels()[i + 1], b: r.pixels()[i + 2] }
        };
        assert_eq!(px(0, 0), style.stops[0]);
        assert_eq!(px(199, 199), style.stops[2]);
    }

    #[test]
    fn disc_clears_only_inside_radius() {
        let mut r = painted(50, 50);
        r.erase_disc(Point::new(25.0, 25.0), 5.0);
        assert_eq!(r.alpha_at(25, 25), Some(0));
        assert_eq!(r.alpha_at(28, 25), Some(0));
        assert_eq!(r.alpha_at(31, 25), Some(255));
        assert_eq!(r.alpha_at(0, 0), Some(255));
    }

    #[test]
    fn segment_has_round_caps() {
        let mut r = painted(100, 40);
        r.erase_segment(Point::new(20.0, 20.0), Point::new(80.0, 20.0), 10.0);
        assert_eq!(r.alpha_at(50, 16), Some(0));
        assert_eq!(r.alpha_at(50, 10), Some(255));
        // past the end point, within the cap radius
        assert_eq!(r.alpha_at(83, 20), Some(0));
        assert_eq!(r.alpha_at(87, 20), Some(255));
    }

    #[test]
    fn off_raster_erase_is_harmless() {
        let mut r = painted(20, 20);
        r.erase_disc(Point::new(-500.0, 900.0), 22.0);
        r.erase_segment(Point::new(f64::NAN, 0.0), Point::new(5.0, 5.0), 45.0);
        assert_eq!(r.sample_coverage(1), Ok(0.0));
    }

    #[test]
    fn empty_raster_reports_error() {
        let r = SoftRaster::new(0, 0);
        assert_eq!(r.sample_coverage(10), Err(SurfaceError::EmptyRaster));
    }
}
