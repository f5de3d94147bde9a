//! Core 0 main loop
//!
//! Captures one LCD frame, polls the gamepad, publishes the button states
//! and runs the menu dispatcher, forever. Every step is blocking; the
//! frame capture busy-polls the LCD bus and sets the loop rate.

use defmt::*;
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Instant};

use gbvga_core::capture::{capture_frame, CaptureOutcome, PinBus};
use gbvga_core::menu::Dispatcher;
use gbvga_core::traits::GamepadDriver;
use gbvga_drivers::gamepad::ClassicController;
use gbvga_drivers::overlay::TextOverlay;
use gbvga_drivers::reset::ResetLine;
use gbvga_hal::OutputPin;
use gbvga_hal_rp2040::{BlockingI2c, GpioInput, GpioOutput};

use crate::channels::{BUTTONS, FRAMEBUFFER};

pub type LcdBus = PinBus<GpioInput<'static>>;
pub type Gamepad = ClassicController<BlockingI2c<'static, I2C0>, Delay>;
pub type MenuDispatcher =
    Dispatcher<'static, TextOverlay<'static>, ResetLine<GpioOutput<'static>, Delay>>;

pub struct Acquisition {
    pub lcd: LcdBus,
    pub gamepad: Gamepad,
    pub dispatcher: MenuDispatcher,
    pub led: GpioOutput<'static>,
}

impl Acquisition {
    pub fn run(mut self) -> ! {
        info!("Acquisition loop started");

        loop {
            if let CaptureOutcome::Resynced { rows } = capture_frame(&mut self.lcd, &FRAMEBUFFER) {
                trace!("Frame restarted after {} rows", rows);
            }

            let now_ms = Instant::now().as_millis() as u32;
            match self.gamepad.poll(now_ms) {
                Ok(Some(buttons)) => {
                    BUTTONS.store(buttons);
                    self.led.set_state(buttons.any());
                }
                Ok(None) => {}
                Err(e) => warn!("Gamepad poll failed: {}", e),
            }

            if let Some(action) = self.dispatcher.dispatch(BUTTONS.load()) {
                debug!("Menu action: {}", action);
            }
        }
    }
}
