//! Driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in gbvga-core:
//!
//! - Gamepad drivers (I2C classic controller)
//! - On-screen text overlay with a built-in 5x7 font
//! - Console reset line
//! - Async button matrix mirroring driven by the console's select lines

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gamepad;
pub mod matrix;
pub mod overlay;
pub mod reset;
