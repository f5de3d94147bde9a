//! gbvga Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the converter's
//! board-agnostic crates are written against. Chip-specific HALs implement
//! them, and host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gbvga-core / gbvga-drivers             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gbvga-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ gbvga-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (LCD bus sampling,
//!   button matrix outputs, console reset line)
//! - [`i2c::I2cBus`] - I2C bus operations (gamepad receiver)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
