//! Board pin map
//!
//! GPIO numbers for the converter board, plus a conflict check. The PIO
//! outputs have extra constraints: the color pins must be consecutive
//! starting at `color_base`, and VSYNC must directly follow HSYNC because
//! the timing program writes both with one `out pins, 2`.
//!
//! Plain GPIO signals are taken from a [`PinBank`] by the numbers in
//! [`BoardPins`], so the table is the wiring. The PIO and I2C pins are
//! typed peripherals and are taken directly.

use heapless::FnvIndexSet;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Number of color output bits (2 per channel)
pub const COLOR_PINS: u8 = 6;

/// Error when checking a pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin assigned twice
    AlreadyTaken(u8),
    /// VSYNC is not the pin after HSYNC
    SyncNotAdjacent,
}

/// GPIO numbers of every signal on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// First of the six color outputs (R0 R1 G0 G1 B0 B1)
    pub color_base: u8,
    pub hsync: u8,
    pub vsync: u8,
    pub i2c_sda: u8,
    pub i2c_scl: u8,
    pub lcd_data0: u8,
    pub lcd_data1: u8,
    pub lcd_pixel_clock: u8,
    pub lcd_hsync: u8,
    pub lcd_vsync: u8,
    /// Direction-key select line from the console
    pub matrix_p14: u8,
    /// Action-key select line from the console
    pub matrix_p15: u8,
    pub matrix_down_start: u8,
    pub matrix_up_select: u8,
    pub matrix_left_b: u8,
    pub matrix_right_a: u8,
    /// Console reset, active low
    pub reset: u8,
    /// On-board activity LED
    pub led: u8,
}

impl BoardPins {
    /// Wiring of the reference board
    pub const DEFAULT: Self = Self {
        color_base: 0,
        hsync: 6,
        vsync: 7,
        i2c_sda: 12,
        i2c_scl: 13,
        lcd_data0: 14,
        lcd_data1: 15,
        lcd_pixel_clock: 16,
        lcd_hsync: 17,
        lcd_vsync: 18,
        matrix_p14: 19,
        matrix_p15: 20,
        matrix_down_start: 21,
        matrix_up_select: 22,
        matrix_left_b: 26,
        matrix_right_a: 27,
        reset: 28,
        led: 25,
    };

    /// Every single-pin signal (color pins excluded)
    fn signals(&self) -> [u8; 17] {
        [
            self.hsync,
            self.vsync,
            self.i2c_sda,
            self.i2c_scl,
            self.lcd_data0,
            self.lcd_data1,
            self.lcd_pixel_clock,
            self.lcd_hsync,
            self.lcd_vsync,
            self.matrix_p14,
            self.matrix_p15,
            self.matrix_down_start,
            self.matrix_up_select,
            self.matrix_left_b,
            self.matrix_right_a,
            self.reset,
            self.led,
        ]
    }

    /// Check that every pin exists and is used once
    pub fn validate(&self) -> Result<(), PinError> {
        if self.vsync != self.hsync.wrapping_add(1) {
            return Err(PinError::SyncNotAdjacent);
        }

        let mut alloc = GpioAllocator::new();
        for pin in self.color_base..self.color_base.saturating_add(COLOR_PINS) {
            alloc.allocate(pin)?;
        }
        for pin in self.signals() {
            alloc.allocate(pin)?;
        }
        Ok(())
    }
}

impl Default for BoardPins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Signals driven as plain GPIO, taken from a [`PinBank`]
pub struct BoardSignals<T> {
    pub lcd_data0: T,
    pub lcd_data1: T,
    pub lcd_pixel_clock: T,
    pub lcd_hsync: T,
    pub lcd_vsync: T,
    pub matrix_p14: T,
    pub matrix_p15: T,
    pub matrix_down_start: T,
    pub matrix_up_select: T,
    pub matrix_left_b: T,
    pub matrix_right_a: T,
    pub reset: T,
    pub led: T,
}

/// Build a [`PinBank`] from the named GPIO peripherals
///
/// ```ignore
/// let mut bank = pin_bank!(p, PIN_14, PIN_15, PIN_16);
/// let pin = bank.take(15)?;
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:ident, $($pin:ident),+ $(,)?) => {{
        let mut bank = $crate::pins::PinBank::empty();
        $(
            let pin: embassy_rp::Peri<'static, embassy_rp::gpio::AnyPin> = $p.$pin.into();
            bank.insert(embassy_rp::gpio::Pin::pin(&*pin), pin);
        )+
        bank
    }};
}

/// GPIO pins that can be taken by number
pub struct PinBank<T> {
    pins: [Option<T>; GPIO_COUNT],
}

impl<T> Default for PinBank<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PinBank<T> {
    pub fn empty() -> Self {
        Self {
            pins: core::array::from_fn(|_| None),
        }
    }

    /// Put `io` in the slot of GPIO `pin`; out of range pins are dropped
    pub fn insert(&mut self, pin: u8, io: T) {
        if let Some(slot) = self.pins.get_mut(pin as usize) {
            *slot = Some(io);
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: u8) -> Result<T, PinError> {
        self.pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin(pin))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin))
    }

    pub fn is_available(&self, pin: u8) -> bool {
        matches!(self.pins.get(pin as usize), Some(Some(_)))
    }

    /// Take every plain GPIO signal at the numbers `board` gives
    pub fn take_signals(&mut self, board: &BoardPins) -> Result<BoardSignals<T>, PinError> {
        Ok(BoardSignals {
            lcd_data0: self.take(board.lcd_data0)?,
            lcd_data1: self.take(board.lcd_data1)?,
            lcd_pixel_clock: self.take(board.lcd_pixel_clock)?,
            lcd_hsync: self.take(board.lcd_hsync)?,
            lcd_vsync: self.take(board.lcd_vsync)?,
            matrix_p14: self.take(board.matrix_p14)?,
            matrix_p15: self.take(board.matrix_p15)?,
            matrix_down_start: self.take(board.matrix_down_start)?,
            matrix_up_select: self.take(board.matrix_up_select)?,
            matrix_left_b: self.take(board.matrix_left_b)?,
            matrix_right_a: self.take(board.matrix_right_a)?,
            reset: self.take(board.reset)?,
            led: self.take(board.led)?,
        })
    }
}

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Allocate a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin >= GPIO_COUNT as u8 {
            return Err(PinError::InvalidPin(pin));
        }
        if self.allocated.contains(&pin) {
            return Err(PinError::AlreadyTaken(pin));
        }
        self.allocated
            .insert(pin)
            .map_err(|_| PinError::InvalidPin(pin))?;
        Ok(())
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator() {
        let mut alloc = GpioAllocator::new();

        assert!(alloc.allocate(11).is_ok());
        assert!(alloc.is_allocated(11));
        assert_eq!(alloc.allocate(11), Err(PinError::AlreadyTaken(11)));
        assert_eq!(alloc.allocate(30), Err(PinError::InvalidPin(30)));
        assert_eq!(alloc.allocated_count(), 1);
    }

    #[test]
    fn test_default_board_is_valid() {
        assert_eq!(BoardPins::DEFAULT.validate(), Ok(()));
    }

    #[test]
    fn test_conflicts_are_reported() {
        let mut pins = BoardPins::DEFAULT;
        pins.led = pins.reset;
        assert_eq!(pins.validate(), Err(PinError::AlreadyTaken(28)));

        // color pins 1..=6 overlap HSYNC
        let mut pins = BoardPins::DEFAULT;
        pins.color_base = 1;
        assert_eq!(pins.validate(), Err(PinError::AlreadyTaken(6)));

        let mut pins = BoardPins::DEFAULT;
        pins.vsync = 8;
        assert_eq!(pins.validate(), Err(PinError::SyncNotAdjacent));
    }

    /// Bank holding its own GPIO number for every pin outside `skip`
    fn numbered_bank(skip: &[u8]) -> PinBank<u8> {
        let mut bank = PinBank::empty();
        for pin in (0..GPIO_COUNT as u8).filter(|pin| !skip.contains(pin)) {
            bank.insert(pin, pin);
        }
        bank
    }

    #[test]
    fn test_bank_take() {
        let mut bank = numbered_bank(&[3]);
        assert!(bank.is_available(4));
        assert_eq!(bank.take(4), Ok(4));
        assert!(!bank.is_available(4));
        assert_eq!(bank.take(4), Err(PinError::AlreadyTaken(4)));
        assert_eq!(bank.take(3), Err(PinError::AlreadyTaken(3)));
        assert_eq!(bank.take(30), Err(PinError::InvalidPin(30)));
    }

    #[test]
    fn test_signals_follow_table() {
        let mut bank = numbered_bank(&[]);
        let io = bank.take_signals(&BoardPins::DEFAULT).unwrap();
        assert_eq!(io.lcd_pixel_clock, 16);
        assert_eq!(io.matrix_p14, 19);
        assert_eq!(io.matrix_right_a, 27);
        assert_eq!(io.led, 25);

        // moving a signal in the table moves the pin that gets taken
        let mut pins = BoardPins::DEFAULT;
        pins.led = 9;
        pins.reset = 10;
        let mut bank = numbered_bank(&[]);
        let io = bank.take_signals(&pins).unwrap();
        assert_eq!(io.led, 9);
        assert_eq!(io.reset, 10);
        assert!(bank.is_available(25));
        assert!(bank.is_available(28));
    }

    #[test]
    fn test_signals_skip_fixed_function_pins() {
        // PIO and I2C pins never enter the bank
        let mut pins = BoardPins::DEFAULT;
        pins.led = 12;
        let mut bank = numbered_bank(&[0, 1, 2, 3, 4, 5, 6, 7, 12, 13]);
        assert_eq!(
            bank.take_signals(&pins).err(),
            Some(PinError::AlreadyTaken(12))
        );
    }
}
