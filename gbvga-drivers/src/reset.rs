//! Console reset line
//!
//! Active-low. Held high from construction; a reset pulls it low for
//! [`RESET_PULSE_MS`] and releases it.

use embedded_hal::delay::DelayNs;
use gbvga_core::config::RESET_PULSE_MS;
use gbvga_core::traits::ConsoleReset;
use gbvga_hal::OutputPin;

/// GPIO-driven reset line
pub struct ResetLine<P: OutputPin, D: DelayNs> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> ResetLine<P, D> {
    /// Take the pin and release the console
    pub fn new(mut pin: P, delay: D) -> Self {
        pin.set_high();
        Self { pin, delay }
    }
}

impl<P: OutputPin, D: DelayNs> ConsoleReset for ResetLine<P, D> {
    fn reset(&mut self) {
        self.pin.set_low();
        self.delay.delay_ms(RESET_PULSE_MS);
        self.pin.set_high();
    }
}
