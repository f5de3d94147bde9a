//! Board-agnostic core logic for the LCD-to-VGA converter
//!
//! This crate contains everything in the video pipeline that does not
//! depend on a specific chip:
//!
//! - Fixed geometry, output mode and timing configuration
//! - Palette / border tables and the shared settings object
//! - Framebuffer and overlay buffer shared between the two cores
//! - Run-length scanline encoding and the scanline compositor
//! - LCD bus acquisition (busy-poll edge state machines)
//! - Button state tracking, button-matrix mirroring and the menu dispatcher
//! - Traits for the external collaborators (overlay, gamepad, reset line)
//!
//! # Shared memory contract
//!
//! The framebuffer, overlay buffer, settings and button states are written
//! by one core and read by the other without locks. All of them are built
//! from `Relaxed` atomics, which compile to plain loads and stores on the
//! Cortex-M0+. A scanline may therefore mix rows from two frames; that tear
//! is accepted in exchange for never stalling the display side.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod input;
pub mod menu;
pub mod settings;
pub mod traits;
pub mod video;

pub use settings::{Settings, SettingsSnapshot, VideoEffect};
