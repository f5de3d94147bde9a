//! I2C classic controller
//!
//! Wireless receivers for classic-style pads speak the extension controller
//! protocol at address `0x52`:
//!
//! - Init: write `F0 55`, wait 10 ms, write `FB 00`, wait 20 ms
//! - Poll: write `00`, wait 1 ms, read 8 bytes
//!
//! Buttons are active-low in bytes 4 and 5. A receiver with no pad paired
//! answers all `0xFF` in bytes 0..4; that report is rejected and the driver
//! re-runs the init sequence after a cooldown.
//!
//! Long waits (power-up, cooldown, poll interval) are deadlines checked
//! against the caller's clock, so a poll that is not due returns at once.
//! Only the few milliseconds the protocol needs between transfers block.

use embedded_hal::delay::DelayNs;
use gbvga_core::config::{
    deadline_reached, GAMEPAD_POLL_INTERVAL_MS, GAMEPAD_POWER_UP_MS, GAMEPAD_RETRY_COOLDOWN_MS,
};
use gbvga_core::input::{Button, ButtonSet};
use gbvga_core::traits::{GamepadDriver, GamepadError};
use gbvga_hal::I2cBus;

/// Receiver I2C address
pub const ADDRESS: u8 = 0x52;

/// Report length in bytes
pub const REPORT_LEN: usize = 8;

const INIT_1: [u8; 2] = [0xF0, 0x55];
const INIT_2: [u8; 2] = [0xFB, 0x00];
const READ_REQUEST: [u8; 1] = [0x00];

/// Button bit positions as (byte, bit, button)
const BUTTON_BITS: [(usize, u8, Button); 9] = [
    (4, 2, Button::Start),
    (4, 3, Button::Home),
    (4, 4, Button::Select),
    (4, 6, Button::Down),
    (4, 7, Button::Right),
    (5, 0, Button::Up),
    (5, 1, Button::Left),
    (5, 4, Button::A),
    (5, 6, Button::B),
];

/// Decode a report into pressed buttons; `None` if it carries no pad data
pub fn decode_report(report: &[u8; REPORT_LEN]) -> Option<ButtonSet> {
    if report[..4].iter().all(|b| *b == 0xFF) {
        return None;
    }
    let buttons = BUTTON_BITS
        .iter()
        .fold(ButtonSet::NONE, |set, (byte, bit, button)| {
            set.with(*button, report[*byte] & (1 << bit) == 0)
        });
    Some(buttons)
}

/// Link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Init sequence has not run
    Uninitialized,
    /// Waiting for the receiver to power up
    PoweringUp,
    /// Initialized; polling
    Ready,
}

/// Classic controller over a blocking I2C bus
pub struct ClassicController<I: I2cBus, D: DelayNs> {
    i2c: I,
    delay: D,
    state: LinkState,
    /// Earliest time the next step may run; `None` runs it on the next call
    next_ms: Option<u32>,
}

impl<I: I2cBus, D: DelayNs> ClassicController<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            state: LinkState::Uninitialized,
            next_ms: None,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    fn init(&mut self) -> Result<(), I::Error> {
        self.i2c.write(ADDRESS, &INIT_1)?;
        self.delay.delay_ms(10);
        self.i2c.write(ADDRESS, &INIT_2)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    fn read_report(&mut self) -> Result<[u8; REPORT_LEN], I::Error> {
        let mut report = [0u8; REPORT_LEN];
        self.i2c.write(ADDRESS, &READ_REQUEST)?;
        self.delay.delay_ms(1);
        self.i2c.read(ADDRESS, &mut report)?;
        Ok(report)
    }

    fn wait_until(&mut self, now_ms: u32, delay_ms: u32) {
        self.next_ms = Some(now_ms.wrapping_add(delay_ms));
    }

    /// Drop the link and retry after the cooldown
    fn back_off(&mut self, now_ms: u32) {
        self.state = LinkState::Uninitialized;
        self.wait_until(now_ms, GAMEPAD_RETRY_COOLDOWN_MS);
    }
}

impl<I: I2cBus, D: DelayNs> GamepadDriver for ClassicController<I, D> {
    fn poll(&mut self, now_ms: u32) -> Result<Option<ButtonSet>, GamepadError> {
        if let Some(deadline) = self.next_ms {
            if !deadline_reached(now_ms, deadline) {
                return Ok(None);
            }
        }

        match self.state {
            LinkState::Uninitialized => {
                self.state = LinkState::PoweringUp;
                self.wait_until(now_ms, GAMEPAD_POWER_UP_MS);
                return Ok(None);
            }
            LinkState::PoweringUp => {
                if self.init().is_err() {
                    self.back_off(now_ms);
                    return Err(GamepadError::Bus);
                }
                self.state = LinkState::Ready;
            }
            LinkState::Ready => {}
        }

        self.wait_until(now_ms, GAMEPAD_POLL_INTERVAL_MS);
        let report = self.read_report().map_err(|_| GamepadError::Bus)?;

        match decode_report(&report) {
            Some(buttons) => Ok(Some(buttons)),
            None => {
                self.back_off(now_ms);
                Err(GamepadError::InvalidReport)
            }
        }
    }
}
