//! Gamepad drivers

pub mod classic;

pub use classic::{decode_report, ClassicController};
