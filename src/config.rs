//! Scratch card tuning and cover styling.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: f64 = 300.0;
pub const DEFAULT_HEIGHT: f64 = 360.0;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 50.0;
pub const DEFAULT_BRUSH_WIDTH: f64 = 45.0;
pub const DEFAULT_BLOT_RADIUS: f64 = 22.0;
pub const DEFAULT_DOUBLE_TAP_MS: f64 = 350.0;
pub const DEFAULT_CHECK_EVERY: u32 = 20;
pub const DEFAULT_AUTO_REVEAL_MS: u32 = 12_000;
/// Sample every 10th pixel (every 40th byte of RGBA8).
pub const DEFAULT_SAMPLE_STRIDE: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// Logical width of the card.
    pub width: f64,
    /// Logical height of the card.
    pub height: f64,
    /// Percent of sampled pixels that must be clear to reveal.
    pub reveal_threshold: f64,
    /// Stroke width in logical units.
    pub brush_width: f64,
    /// Radius of a single tap blot in logical units.
    pub blot_radius: f64,
    pub double_tap_ms: f64,
    /// Coverage is re-checked every this many move strokes.
    pub check_every: u32,
    pub auto_reveal_ms: u32,
    pub sample_stride: usize,
    /// Overrides every gradient stop of the cover.
    pub cover_color: Option<String>,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            brush_width: DEFAULT_BRUSH_WIDTH,
            blot_radius: DEFAULT_BLOT_RADIUS,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            check_every: DEFAULT_CHECK_EVERY,
            auto_reveal_ms: DEFAULT_AUTO_REVEAL_MS,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            cover_color: None,
        }
    }
}

impl ScratchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(ConfigError::Size {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=100.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Threshold(self.reveal_threshold));
        }
        if self.check_every == 0 {
            return Err(ConfigError::ZeroField("check_every"));
        }
        if self.sample_stride == 0 {
            return Err(ConfigError::ZeroField("sample_stride"));
        }
        if !size_ok(self.brush_width) {
            return Err(ConfigError::ZeroField("brush_width"));
        }
        if !size_ok(self.blot_radius) {
            return Err(ConfigError::ZeroField("blot_radius"));
        }
        if let Some(c) = &self.cover_color {
            Rgb::from_hex(c)?;
        }
        Ok(())
    }

    /// Validated copy, or the defaults if this one is unusable.
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                crate::util::cwarn(&format!("scratch config rejected ({e}), using defaults"));
                Self::default()
            }
        }
    }

    pub fn cover_style(&self) -> CoverStyle {
        let mut style = CoverStyle::default();
        if let Some(c) = self.cover_color.as_deref().and_then(|c| Rgb::from_hex(c).ok()) {
            style.stops = [c; 3];
        }
        style
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[cfg(test)]
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ConfigError::Color(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::Color(s.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[cfg(test)]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// How the opaque cover is decorated. Sizes are logical units.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverStyle {
    /// Diagonal gradient at offsets 0, 0.5 and 1.
    pub stops: [Rgb; 3],
    pub dot_count: u32,
    pub dot_min_radius: f64,
    pub dot_max_radius: f64,
    pub dot_opacity: f64,
    pub label: String,
    pub label_px: f64,
    pub label_opacity: f64,
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self {
            stops: [
                Rgb { r: 0xF4, g: 0xB8, b: 0xC1 },
                Rgb { r: 0xE8, g: 0xA0, b: 0xB4 },
                Rgb { r: 0xD4, g: 0x89, b: 0x9E },
            ],
            dot_count: 50,
            dot_min_radius: 1.0,
            dot_max_radius: 4.0,
            dot_opacity: 0.3,
            label: "Scratch to reveal \u{2665}".to_string(),
            label_px: 18.0,
            label_opacity: 0.7,
        }
    }
}

#[cfg(test)]
impl CoverStyle {
    /// Gradient color at `t` in 0..=1 along the diagonal.
    pub fn gradient_at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.5 {
            self.stops[0].lerp(self.stops[1], t * 2.0)
        } else {
            self.stops[1].lerp(self.stops[2], (t - 0.5) * 2.0)
        }
    }
}
