//! Collaborator traits
//!
//! These traits define the interface between the pipeline logic and the
//! pieces it drives but does not implement: the LCD bus pins, the on-screen
//! menu renderer, the gamepad driver and the console reset line.

pub mod gamepad;
pub mod lcd;
pub mod overlay;
pub mod reset;

pub use gamepad::{GamepadDriver, GamepadError};
pub use lcd::{LcdBus, LcdLine};
pub use overlay::Overlay;
pub use reset::ConsoleReset;
