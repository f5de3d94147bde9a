//! GPIO implementations of the `gbvga-hal` pin traits
//!
//! Thin wrappers over `embassy_rp::gpio`. Reads go straight to the SIO
//! input register, which keeps the LCD sampler's spin loops short.

use embassy_rp::gpio::{Input, Level, Output};
use gbvga_hal::{InputPin, OutputPin};

/// Digital input
pub struct GpioInput<'d> {
    pin: Input<'d>,
}

impl<'d> GpioInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for GpioInput<'_> {
    #[inline(always)]
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Digital output
pub struct GpioOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GpioOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for GpioOutput<'_> {
    #[inline(always)]
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn set_state(&mut self, high: bool) {
        self.pin.set_level(Level::from(high));
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
