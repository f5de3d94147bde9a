//! Controller input
//!
//! - [`ButtonSet`]: pressed states for all logical buttons
//! - [`ButtonTracker`]: current vs. previous poll, for release edges
//! - [`SharedButtons`]: the latest states, handed across cores
//! - [`matrix`]: mirroring states onto the console's button matrix

mod buttons;
pub mod matrix;

pub use buttons::{Button, ButtonSet, ButtonTracker, SharedButtons};
pub use matrix::{release_lockup_combo, ButtonMatrix, MatrixEvent, MatrixLevels};
