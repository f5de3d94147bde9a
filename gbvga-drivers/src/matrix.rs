//! Button matrix mirroring driven by the select lines
//!
//! Waits for the console's select line edges and updates the matrix
//! outputs from the shared button states. Meant to run at interrupt
//! priority on the core that does not sample the LCD.

use embassy_futures::select::{select, Either};
use embedded_hal_async::digital::Wait;
use gbvga_core::input::{ButtonMatrix, MatrixEvent, SharedButtons};
use gbvga_core::video::OverlayBuffer;
use gbvga_hal::OutputPin;

/// The two matrix select inputs
///
/// P14 alternates falling (direction keys) and rising (action keys); the
/// next expected edge is tracked rather than read back from the pin. If the
/// two drift apart the wrong edge simply never completes and the next edge
/// of the other polarity puts them back in step.
pub struct SelectLines<W: Wait> {
    dpad: W,
    buttons: W,
    dpad_low: bool,
}

impl<W: Wait> SelectLines<W> {
    /// Take the select inputs; both idle high
    pub fn new(dpad: W, buttons: W) -> Self {
        Self {
            dpad,
            buttons,
            dpad_low: false,
        }
    }

    /// Wait for the next select event
    pub async fn next_event(&mut self) -> Result<MatrixEvent, W::Error> {
        let Self {
            dpad,
            buttons,
            dpad_low,
        } = self;
        let low = *dpad_low;

        let dpad_edge = async {
            if low {
                dpad.wait_for_rising_edge().await
            } else {
                dpad.wait_for_falling_edge().await
            }
        };

        match select(dpad_edge, buttons.wait_for_rising_edge()).await {
            Either::First(result) => {
                result?;
                *dpad_low = !low;
                Ok(if low {
                    MatrixEvent::ActionSelect
                } else {
                    MatrixEvent::DirectionSelect
                })
            }
            Either::Second(result) => {
                result?;
                Ok(MatrixEvent::ScanComplete)
            }
        }
    }
}

/// Mirror buttons onto the matrix for as long as the select lines work
pub async fn run_mirror<W: Wait, P: OutputPin>(
    lines: &mut SelectLines<W>,
    matrix: &mut ButtonMatrix<P>,
    buttons: &SharedButtons,
    overlay: &OverlayBuffer,
) -> Result<core::convert::Infallible, W::Error> {
    loop {
        let event = lines.next_event().await?;
        matrix.handle(event, buttons.load(), overlay.is_enabled());
    }
}
