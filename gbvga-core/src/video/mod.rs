//! Video pipeline
//!
//! Acquisition fills the [`Framebuffer`]; the [`Compositor`] turns one output
//! line at a time into a run-encoded [`ScanlineBuffer`] for the display
//! timing generator.

pub mod compositor;
pub mod encoding;
pub mod framebuffer;
pub mod maps;
pub mod overlay;
pub mod palette;

pub use compositor::{Compositor, GeometryError, LineKind};
pub use encoding::{op, DecodeError, ScanlineBuffer};
pub use framebuffer::Framebuffer;
pub use maps::CoordinateMaps;
pub use overlay::OverlayBuffer;
pub use palette::{Color, BORDER_COLORS, SCHEMES};
