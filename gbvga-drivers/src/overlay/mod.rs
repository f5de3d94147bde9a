//! On-screen overlay renderers

mod font;
pub mod text;

pub use text::TextOverlay;
