// Card geometry: logical size, device pixel ratio, and client -> raster mapping.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Where the canvas sits on screen, in CSS pixels (a `DomRect` snapshot).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub logical_width: f64,
    pub logical_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(logical_width: f64, logical_height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            logical_width,
            logical_height,
            pixel_ratio,
        }
    }

    /// Backing raster size in device pixels.
    pub fn raster_size(&self) -> (u32, u32) {
        let w = (self.logical_width * self.pixel_ratio).round().max(1.0) as u32;
        let h = (self.logical_height * self.pixel_ratio).round().max(1.0) as u32;
        (w, h)
    }

    /// Raster pixels per logical unit; brush sizes are multiplied by this.
    /// Rounding can leave the axes slightly apart, so both ratios are averaged.
    pub fn raster_scale(&self) -> f64 {
        let (w, h) = self.raster_size();
        (w as f64 / self.logical_width + h as f64 / self.logical_height) / 2.0
    }
}

/// Maps a client-space position onto the raster, scaling each axis by
/// raster dimension / displayed dimension. `None` when the canvas has no
/// visible area or the input is not a number.
pub fn client_to_raster(client_x: f64, client_y: f64, rect: DisplayRect, raster: (u32, u32)) -> Option<Point> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    let scale_x = raster.0 as f64 / rect.width;
    let scale_y = raster.1 as f64 / rect.height;
    let p = Point::new((client_x - rect.left) * scale_x, (client_y - rect.top) * scale_y);
    p.is_finite().then_some(p)
}
