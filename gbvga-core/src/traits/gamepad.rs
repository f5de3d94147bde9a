//! Gamepad driver trait

use crate::input::ButtonSet;

/// Errors that can occur while polling a gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamepadError {
    /// Bus transfer failed
    Bus,
    /// Device answered with a report that carries no controller data
    InvalidReport,
}

/// Polled gamepad
pub trait GamepadDriver {
    /// Poll the device if it is due
    ///
    /// Returns `Ok(Some(buttons))` with fresh states, `Ok(None)` when the
    /// call was rate limited or the driver is still powering up. On error
    /// the caller keeps its previous states; the driver reinitializes
    /// itself on a later call.
    fn poll(&mut self, now_ms: u32) -> Result<Option<ButtonSet>, GamepadError>;
}
