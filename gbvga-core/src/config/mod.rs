//! Compile-time configuration
//!
//! The converter targets one fixed input protocol and one fixed output mode,
//! so all configuration is constant. `const` assertions keep the derived
//! values consistent with each other.

pub mod geometry;
pub mod mode;
pub mod timing;

pub use geometry::*;
pub use mode::*;
pub use timing::*;
