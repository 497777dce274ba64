pub mod stroke;
pub mod viewport;

pub use stroke::StrokeState;
pub use viewport::{client_to_raster, DisplayRect, Point, Viewport};
