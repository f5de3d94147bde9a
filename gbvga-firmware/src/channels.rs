//! State shared between the two cores
//!
//! Everything here except the startup signal is built from `Relaxed`
//! atomics and is read and written without locks. Each item has exactly
//! one writer:
//!
//! | Item             | Writer                  | Readers                  |
//! |------------------|-------------------------|--------------------------|
//! | `FRAMEBUFFER`    | acquisition (core 0)    | video (core 1)           |
//! | `OVERLAY_BUFFER` | dispatcher (core 0)     | video, matrix (core 1)   |
//! | `SETTINGS`       | dispatcher (core 0)     | video (core 1)           |
//! | `BUTTONS`        | gamepad poll (core 0)   | dispatcher, matrix       |

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use gbvga_core::input::SharedButtons;
use gbvga_core::video::{CoordinateMaps, Framebuffer, OverlayBuffer};
use gbvga_core::Settings;

/// Captured source frame, one 2-bit sample per pixel
pub static FRAMEBUFFER: Framebuffer = Framebuffer::new();

/// Menu overlay pixels and visibility flag
pub static OVERLAY_BUFFER: OverlayBuffer = OverlayBuffer::new();

/// Active scheme, border, effect and accent
pub static SETTINGS: Settings = Settings::new();

/// Latest gamepad button states
pub static BUTTONS: SharedButtons = SharedButtons::new();

/// Output-to-source coordinate lookup tables
pub static MAPS: CoordinateMaps = CoordinateMaps::new();

/// Raised once by the video task when output is about to start
pub static VIDEO_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
