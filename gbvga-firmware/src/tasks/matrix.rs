//! Button matrix mirroring task
//!
//! Spawned on the core 1 interrupt executor so a select line edge preempts
//! scanline rendering and the outputs settle before the console reads them.

use defmt::*;
use embassy_rp::gpio::Input;

use gbvga_core::input::ButtonMatrix;
use gbvga_drivers::matrix::{run_mirror, SelectLines};
use gbvga_hal_rp2040::GpioOutput;

use crate::channels::{BUTTONS, OVERLAY_BUFFER};

#[embassy_executor::task]
pub async fn matrix_task(
    mut lines: SelectLines<Input<'static>>,
    mut matrix: ButtonMatrix<GpioOutput<'static>>,
) -> ! {
    info!("Matrix mirroring started");

    // GPIO waits cannot fail
    match run_mirror(&mut lines, &mut matrix, &BUTTONS, &OVERLAY_BUFFER).await {
        Ok(never) | Err(never) => match never {},
    }
}
