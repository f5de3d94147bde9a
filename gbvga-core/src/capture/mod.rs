//! LCD signal acquisition
//!
//! Samples one frame of the console's LCD bus into the [`Framebuffer`] by
//! busy-polling its timing lines:
//!
//! - Wait for frame sync to be high
//! - Per row: wait for a line sync pulse, sample pixel 0, then sample each
//!   further pixel after a falling pixel clock edge
//! - After each row, stop early if frame sync has dropped and risen again
//!
//! The early stop can leave rows from two different frames in the
//! framebuffer. That is kept as-is and reported as
//! [`CaptureOutcome::Resynced`] so the caller can tell.

mod bus;
mod edge;

pub use bus::PinBus;
pub use edge::{wait_edge, wait_level, Edge, EdgeWait, FrameSyncWatch};

use crate::config::{SOURCE_HEIGHT, SOURCE_WIDTH};
use crate::traits::{LcdBus, LcdLine};
use crate::video::Framebuffer;

/// How a frame capture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureOutcome {
    /// Every row of the frame was captured
    Complete,
    /// A new frame started after `rows` rows; the rest are stale
    Resynced { rows: usize },
}

/// Capture one source frame
///
/// Blocks for as long as the source takes; there is no timeout.
pub fn capture_frame<B: LcdBus>(bus: &mut B, framebuffer: &Framebuffer) -> CaptureOutcome {
    wait_level(bus, LcdLine::VSync, true);

    let mut watch = FrameSyncWatch::new();
    for y in 0..SOURCE_HEIGHT {
        wait_edge(bus, LcdLine::HSync, Edge::Falling);
        framebuffer.store(0, y, bus.sample());

        for x in 1..SOURCE_WIDTH {
            wait_edge(bus, LcdLine::PixelClock, Edge::Falling);
            framebuffer.store(x, y, bus.sample());
        }

        if watch.observe(bus.level(LcdLine::VSync)) {
            let rows = y + 1;
            if rows < SOURCE_HEIGHT {
                return CaptureOutcome::Resynced { rows };
            }
        }
    }

    CaptureOutcome::Complete
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKS_PER_ROW: u64 = 800;
    const TICKS_PER_PIXEL: u64 = 5;

    /// Procedural LCD bus; every timing line read advances one tick
    ///
    /// Per row: line sync high for 2 ticks, then pixel 0 is valid for 3
    /// ticks; every further pixel has the clock high for 2 ticks and low for
    /// 3, with data valid while low. Frame sync is high during row 0.
    struct ScriptedLcd {
        tick: u64,
        frame_rows: u64,
        limit: u64,
    }

    impl ScriptedLcd {
        fn new(frame_rows: u64) -> Self {
            Self {
                tick: 0,
                frame_rows,
                limit: TICKS_PER_ROW * 400,
            }
        }

        fn row_in_frame(&self, tick: u64) -> u64 {
            (tick / TICKS_PER_ROW) % self.frame_rows
        }
    }

    fn pixel_value(row: u64, x: u64) -> u8 {
        ((row * 3 + x) % 4) as u8
    }

    impl LcdBus for ScriptedLcd {
        fn level(&mut self, line: LcdLine) -> bool {
            let t = self.tick;
            assert!(t < self.limit, "bus stalled");
            self.tick += 1;
            let r = t % TICKS_PER_ROW;
            match line {
                LcdLine::HSync => r < 2,
                LcdLine::VSync => self.row_in_frame(t) == 0,
                LcdLine::PixelClock => r >= TICKS_PER_PIXEL && r % TICKS_PER_PIXEL < 2,
            }
        }

        fn sample(&mut self) -> u8 {
            let row = self.row_in_frame(self.tick);
            let x = (self.tick % TICKS_PER_ROW) / TICKS_PER_PIXEL;
            if row < SOURCE_HEIGHT as u64 {
                pixel_value(row, x)
            } else {
                0
            }
        }
    }

    fn row_matches(fb: &Framebuffer, y: usize, source_row: u64) -> bool {
        (0..SOURCE_WIDTH).all(|x| fb.load(x, y) == pixel_value(source_row, x as u64))
    }

    #[test]
    fn test_full_frame() {
        let fb = Framebuffer::new();
        let mut bus = ScriptedLcd::new(154);

        assert_eq!(capture_frame(&mut bus, &fb), CaptureOutcome::Complete);
        for y in 0..SOURCE_HEIGHT {
            assert!(row_matches(&fb, y, y as u64), "row {y}");
        }

        // the next call waits out vertical blank and lines up on the next frame
        fb.fill(0);
        assert_eq!(capture_frame(&mut bus, &fb), CaptureOutcome::Complete);
        assert!(row_matches(&fb, 0, 0));
        assert!(row_matches(&fb, SOURCE_HEIGHT - 1, SOURCE_HEIGHT as u64 - 1));
    }

    #[test]
    fn test_resync_ends_frame_early() {
        let fb = Framebuffer::new();
        fb.fill(3);
        let mut bus = ScriptedLcd::new(50);

        assert_eq!(
            capture_frame(&mut bus, &fb),
            CaptureOutcome::Resynced { rows: 51 }
        );
        for y in 0..50 {
            assert!(row_matches(&fb, y, y as u64));
        }
        // row 50 already holds the first row of the next frame
        assert!(row_matches(&fb, 50, 0));
        // rows after the resync are left as they were
        assert!((0..SOURCE_WIDTH).all(|x| fb.load(x, 60) == 3));
    }

    #[test]
    fn test_resync_on_last_row_counts_as_complete() {
        let fb = Framebuffer::new();
        let mut bus = ScriptedLcd::new(SOURCE_HEIGHT as u64 - 1);

        assert_eq!(capture_frame(&mut bus, &fb), CaptureOutcome::Complete);
        assert!(row_matches(&fb, SOURCE_HEIGHT - 1, 0));
    }
}
