//! LCD bus over discrete input pins

use gbvga_hal::InputPin;

use crate::traits::{LcdBus, LcdLine};

/// The five LCD bus inputs
pub struct PinBus<P: InputPin> {
    pixel_clock: P,
    hsync: P,
    vsync: P,
    data0: P,
    data1: P,
}

impl<P: InputPin> PinBus<P> {
    pub fn new(pixel_clock: P, hsync: P, vsync: P, data0: P, data1: P) -> Self {
        Self {
            pixel_clock,
            hsync,
            vsync,
            data0,
            data1,
        }
    }
}

impl<P: InputPin> LcdBus for PinBus<P> {
    #[inline(always)]
    fn level(&mut self, line: LcdLine) -> bool {
        match line {
            LcdLine::PixelClock => self.pixel_clock.is_high(),
            LcdLine::HSync => self.hsync.is_high(),
            LcdLine::VSync => self.vsync.is_high(),
        }
    }

    #[inline(always)]
    fn sample(&mut self) -> u8 {
        ((self.data0.is_high() as u8) << 1) | self.data1.is_high() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    fn pin(high: bool) -> MockPin {
        MockPin { high }
    }

    #[test]
    fn test_sample_bit_order() {
        let mut bus = PinBus::new(pin(false), pin(true), pin(false), pin(true), pin(false));
        assert_eq!(bus.sample(), 0b10);
        assert!(bus.level(LcdLine::HSync));
        assert!(!bus.level(LcdLine::VSync));

        let mut bus = PinBus::new(pin(true), pin(false), pin(false), pin(false), pin(true));
        assert_eq!(bus.sample(), 0b01);
        assert!(bus.level(LcdLine::PixelClock));
    }
}
