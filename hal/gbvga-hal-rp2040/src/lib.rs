//! RP2040-specific HAL for the gbvga converter
//!
//! This crate provides RP2040-specific implementations of the shared
//! `gbvga-hal` traits, plus RP2040-specific functionality:
//!
//! - Board pin map and pin conflict check
//! - GPIO input/output wrappers
//! - Blocking I2C master for the gamepad receiver
//! - PIO scanline video generator (sync timing + run-encoded pixels)

#![cfg_attr(not(test), no_std)]

pub mod gpio;
pub mod i2c;
pub mod pins;
pub mod scanvideo;
pub mod timing;

pub use gpio::{GpioInput, GpioOutput};
pub use i2c::{BlockingI2c, I2cError};
pub use pins::{BoardPins, BoardSignals, PinBank, PinError};
pub use scanvideo::{ScanVideo, VideoError};
