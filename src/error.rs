//! Error types. None of these are fatal to the viewer: every failure degrades
//! to "not yet revealed" and skip/timeout still advance.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("scratch canvas is not mounted")]
    CanvasMissing,
    #[error("2d context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("cover read-back failed: {0}")]
    ReadBack(String),
    #[error("cover draw failed: {0}")]
    Draw(String),
    #[error("cover raster is empty")]
    EmptyRaster,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("card size must be positive, got {width}x{height}")]
    Size { width: f64, height: f64 },
    #[error("reveal threshold {0} is outside 0..=100")]
    Threshold(f64),
    #[error("{0} must be at least 1")]
    ZeroField(&'static str),
    #[error("invalid color {0:?}, expected #rrggbb")]
    Color(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("deck json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("deck has no cards")]
    Empty,
    #[error("deck scratch settings: {0}")]
    Config(#[from] ConfigError),
}
