pub mod app;
pub mod next_button;
pub mod progress_dots;
pub mod scratch_card;

pub use app::App;
