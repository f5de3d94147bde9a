//! Console reset line trait

/// Cold reset of the attached console
pub trait ConsoleReset {
    /// Pulse the reset line; returns once the console is released
    fn reset(&mut self);
}
