//! The scratch surface: an erasable cover over hidden content and the small
//! `Covered -> Revealed` state machine deciding when enough of it is gone.
//!
//! Every operation runs synchronously inside one event callback. The reveal
//! transition is idempotent, so the auto-reveal timer, a double tap, skip and
//! a threshold crossing may all race for it without coordination.

pub mod canvas;
pub mod coverage;
#[cfg(test)]
pub mod raster;

pub use canvas::CanvasLayer;
#[cfg(test)]
pub use raster::SoftRaster;

use crate::config::{CoverStyle, ScratchConfig};
use crate::error::SurfaceError;
use crate::state::{Point, StrokeState, Viewport};
use crate::util::{clog, cwarn};

/// An erasable RGBA raster. Coordinates and sizes are raster pixels.
pub trait CoverLayer {
    fn raster_size(&self) -> (u32, u32);
    /// Reallocates the raster; previous content is discarded.
    fn resize(&mut self, width: u32, height: u32);
    /// Paints the opaque decorated cover. `scale` is raster pixels per
    /// logical unit, `rng` yields values in `0.0..1.0`.
    fn paint_cover(
        &mut self,
        style: &CoverStyle,
        scale: f64,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<(), SurfaceError>;
    fn erase_disc(&mut self, center: Point, radius: f64);
    /// Round-capped, round-joined stroke of the given width.
    fn erase_segment(&mut self, from: Point, to: Point, width: f64);
    /// Percent of sampled pixels that are fully clear.
    fn sample_coverage(&self, stride: usize) -> Result<f64, SurfaceError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCause {
    Threshold,
    DoubleTap,
    Skip,
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Covered,
    Revealed(RevealCause),
}

pub struct ScratchSurface<L> {
    config: ScratchConfig,
    /// `None` when no drawing surface could be acquired.
    layer: Option<L>,
    stroke: StrokeState,
    /// Raster pixels per logical unit.
    brush_scale: f64,
    state: RevealState,
    coverage: f64,
    auto_reveal_deadline: Option<f64>,
    on_reveal: Option<Box<dyn FnMut(RevealCause)>>,
}

impl<L: CoverLayer> ScratchSurface<L> {
    pub fn new(config: ScratchConfig, layer: Option<L>) -> Self {
        Self {
            config,
            layer,
            stroke: StrokeState::default(),
            brush_scale: 1.0,
            state: RevealState::Covered,
            coverage: 0.0,
            auto_reveal_deadline: None,
            on_reveal: None,
        }
    }

    /// Registers the single "revealed" notification.
    pub fn set_on_reveal(&mut self, f: impl FnMut(RevealCause) + 'static) {
        self.on_reveal = Some(Box::new(f));
    }

    /// Hands the surface a drawing layer acquired after construction.
    pub fn attach(&mut self, layer: L) {
        self.layer = Some(layer);
    }

    /// Allocates the raster at device-pixel resolution and paints the cover,
    /// replacing whatever was there. Without a layer this does nothing.
    pub fn initialize(&mut self, viewport: Viewport, style: &CoverStyle, rng: &mut dyn FnMut() -> f64) {
        self.brush_scale = viewport.raster_scale();
        let Some(layer) = self.layer.as_mut() else {
            return;
        };
        let (w, h) = viewport.raster_size();
        layer.resize(w, h);
        if let Err(e) = layer.paint_cover(style, self.brush_scale, rng) {
            cwarn(&format!("scratch cover paint failed: {e}"));
        }
    }

    pub fn pointer_down(&mut self, at: Point, now_ms: f64) {
        if self.is_revealed() {
            return;
        }
        if self.auto_reveal_deadline.is_none() {
            self.auto_reveal_deadline = Some(now_ms + self.config.auto_reveal_ms as f64);
        }
        if self.stroke.is_double_tap(now_ms, self.config.double_tap_ms) {
            self.reveal(RevealCause::DoubleTap);
            return;
        }
        // An unreadable position still starts scratching; only the blot is skipped.
        let at = at.is_finite().then_some(at);
        self.stroke.begin(at, now_ms);
        let radius = self.config.blot_radius * self.brush_scale;
        if let (Some(at), Some(layer)) = (at, self.layer.as_mut()) {
            layer.erase_disc(at, radius);
        }
    }

    pub fn pointer_move(&mut self, to: Point) {
        if !self.stroke.scratching || self.is_revealed() || !to.is_finite() {
            return;
        }
        let from = self.stroke.extend(to);
        let width = self.config.brush_width * self.brush_scale;
        let radius = self.config.blot_radius * self.brush_scale;
        if let Some(layer) = self.layer.as_mut() {
            match from {
                Some(from) => layer.erase_segment(from, to, width),
                None => layer.erase_disc(to, radius),
            }
        }
        if self.stroke.strokes % self.config.check_every.max(1) == 0 {
            self.check_coverage();
        }
    }

    /// Lifting always re-checks, so a stroke that crossed the threshold
    /// between sampled counts still reveals.
    pub fn pointer_up(&mut self) {
        self.stroke.end();
        self.check_coverage();
    }

    pub fn skip(&mut self) {
        self.reveal(RevealCause::Skip);
    }

    /// Fired by the one-shot timer armed on the first pointer-down. Reveals
    /// only once `now_ms` has reached the deadline.
    pub fn expire_auto_reveal(&mut self, now_ms: f64) -> bool {
        match self.auto_reveal_deadline {
            Some(deadline) if now_ms >= deadline => self.reveal(RevealCause::Timeout),
            _ => false,
        }
    }

    /// Re-estimates coverage from the raster and reveals past the threshold.
    /// Returns the fresh estimate, if one could be taken.
    pub fn check_coverage(&mut self) -> Option<f64> {
        if self.is_revealed() {
            return None;
        }
        let layer = self.layer.as_ref()?;
        match layer.sample_coverage(self.config.sample_stride) {
            Ok(pct) => {
                self.coverage = pct;
                if coverage::crosses(pct, self.config.reveal_threshold) {
                    self.reveal(RevealCause::Threshold);
                }
                Some(pct)
            }
            Err(e) => {
                cwarn(&format!("scratch coverage check failed: {e}"));
                None
            }
        }
    }

    /// One-way transition. Returns whether this call performed it.
    pub fn reveal(&mut self, cause: RevealCause) -> bool {
        if self.is_revealed() {
            return false;
        }
        self.state = RevealState::Revealed(cause);
        self.stroke.end();
        clog(&format!("scratch revealed: {cause:?} at {:.1}% coverage", self.coverage));
        if let Some(f) = self.on_reveal.as_mut() {
            f(cause);
        }
        true
    }

    pub fn reveal_cause(&self) -> Option<RevealCause> {
        match self.state {
            RevealState::Revealed(cause) => Some(cause),
            RevealState::Covered => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal_cause().is_some()
    }

    pub fn is_scratching(&self) -> bool {
        self.stroke.scratching
    }

    pub fn auto_reveal_deadline(&self) -> Option<f64> {
        self.auto_reveal_deadline
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }
}

#[cfg(test)]
impl<L: CoverLayer> ScratchSurface<L> {
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Last computed estimate, in percent.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    pub fn layer(&self) -> Option<&L> {
        self.layer.as_ref()
    }

    pub fn layer_mut(&mut self) -> Option<&mut L> {
        self.layer.as_mut()
    }
}
