//! Video output task
//!
//! Runs the geometry self-check, then hands the compositor to the scanline
//! generator for good. Core 0 is released through the startup signal once
//! both state machines are running.

use defmt::*;
use embassy_rp::peripherals::{DMA_CH0, PIO0};

use gbvga_core::video::{Compositor, ScanlineBuffer};
use gbvga_hal_rp2040::ScanVideo;

use crate::channels::{FRAMEBUFFER, MAPS, OVERLAY_BUFFER, SETTINGS, VIDEO_READY};

/// Scanline generator on PIO0 (timing on SM0, pixels on SM1) fed by DMA0
pub type Video = ScanVideo<'static, PIO0, DMA_CH0, 0, 1>;

#[embassy_executor::task]
pub async fn video_task(mut video: Video) -> ! {
    let compositor = Compositor::new(&FRAMEBUFFER, &OVERLAY_BUFFER, &SETTINGS, &MAPS);

    let mut probe = ScanlineBuffer::new();
    match compositor.check_geometry(video.mode().h_active, &mut probe) {
        Ok(()) => info!("Geometry check passed"),
        Err(e) => error!("Geometry check failed: {}", e),
    }

    info!(
        "Video output starting: {}x{}",
        video.mode().h_active,
        video.mode().v_active
    );

    video
        .run(
            || VIDEO_READY.signal(()),
            |line, buf| {
                compositor.render(line, buf);
            },
        )
        .await
}
