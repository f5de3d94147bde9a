//! Source framebuffer
//!
//! One cell per source pixel holding a 2-bit shade index. Acquisition is the
//! only writer; the compositor reads rows while they may still be changing.

use portable_atomic::{AtomicU8, Ordering};

use crate::config::{SOURCE_HEIGHT, SOURCE_PIXEL_COUNT, SOURCE_WIDTH};

/// Mask applied to every stored sample
pub const SAMPLE_MASK: u8 = 0b11;

/// Shared source framebuffer
///
/// Cells are `Relaxed` atomics: stores and loads are plain word accesses with
/// no ordering between cells, so a reader may observe a row from two frames.
pub struct Framebuffer {
    cells: [AtomicU8; SOURCE_PIXEL_COUNT],
}

impl Framebuffer {
    /// Create a framebuffer with every sample at shade 0
    pub const fn new() -> Self {
        Self {
            cells: [const { AtomicU8::new(0) }; SOURCE_PIXEL_COUNT],
        }
    }

    /// Store the sample for pixel `(x, y)`
    #[inline(always)]
    pub fn store(&self, x: usize, y: usize, sample: u8) {
        self.cells[y * SOURCE_WIDTH + x].store(sample & SAMPLE_MASK, Ordering::Relaxed);
    }

    /// Load the sample for pixel `(x, y)`
    #[inline(always)]
    pub fn load(&self, x: usize, y: usize) -> u8 {
        self.cells[y * SOURCE_WIDTH + x].load(Ordering::Relaxed)
    }

    /// Borrow one source row
    ///
    /// # Panics
    /// If `y >= SOURCE_HEIGHT`.
    #[inline(always)]
    pub fn row(&self, y: usize) -> &[AtomicU8] {
        assert!(y < SOURCE_HEIGHT);
        let start = y * SOURCE_WIDTH;
        &self.cells[start..start + SOURCE_WIDTH]
    }

    /// Set every sample to `sample`
    pub fn fill(&self, sample: u8) {
        for cell in &self.cells {
            cell.store(sample & SAMPLE_MASK, Ordering::Relaxed);
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
