//! Overlay pixel buffer
//!
//! The on-screen menu is drawn into a fixed rectangle of source pixels,
//! centered over the game image. Each cell holds an output [`Color`]. The
//! renderer writes it from the dispatch context and the compositor reads it
//! from the video context, under the same relaxed contract as the
//! [`Framebuffer`](super::Framebuffer).

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::config::{OVERLAY_HEIGHT, OVERLAY_WIDTH, OVERLAY_X, OVERLAY_Y};

use super::palette::Color;

const OVERLAY_PIXELS: usize = OVERLAY_WIDTH * OVERLAY_HEIGHT;

/// Shared overlay buffer plus its visibility flag
pub struct OverlayBuffer {
    enabled: AtomicBool,
    pixels: [AtomicU8; OVERLAY_PIXELS],
}

impl OverlayBuffer {
    /// Create a hidden, all-black overlay
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            pixels: [const { AtomicU8::new(0) }; OVERLAY_PIXELS],
        }
    }

    /// Width in source pixels
    pub const fn width(&self) -> usize {
        OVERLAY_WIDTH
    }

    /// Height in source pixels
    pub const fn height(&self) -> usize {
        OVERLAY_HEIGHT
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether source row `y` crosses the overlay rectangle
    #[inline(always)]
    pub const fn covers_row(y: usize) -> bool {
        y >= OVERLAY_Y && y < OVERLAY_Y + OVERLAY_HEIGHT
    }

    /// Whether source column `x` crosses the overlay rectangle
    #[inline(always)]
    pub const fn covers_column(x: usize) -> bool {
        x >= OVERLAY_X && x < OVERLAY_X + OVERLAY_WIDTH
    }

    /// Whether source pixel `(x, y)` lies inside the overlay rectangle
    #[inline(always)]
    pub const fn contains(x: usize, y: usize) -> bool {
        Self::covers_column(x) && Self::covers_row(y)
    }

    /// Pixel at overlay-local coordinates
    #[inline(always)]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * OVERLAY_WIDTH + x].load(Ordering::Relaxed) as Color
    }

    /// Pixel at a row-major index
    #[inline(always)]
    pub fn pixel_at(&self, index: usize) -> Color {
        self.pixels[index].load(Ordering::Relaxed) as Color
    }

    /// Set a pixel at overlay-local coordinates; out-of-range writes are ignored
    pub fn set_pixel(&self, x: usize, y: usize, color: Color) {
        if x < OVERLAY_WIDTH && y < OVERLAY_HEIGHT {
            self.pixels[y * OVERLAY_WIDTH + x].store(color as u8, Ordering::Relaxed);
        }
    }

    /// Fill the whole buffer with one color
    pub fn fill(&self, color: Color) {
        for px in &self.pixels {
            px.store(color as u8, Ordering::Relaxed);
        }
    }
}

impl Default for OverlayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_is_centered() {
        assert!(OverlayBuffer::contains(20, 40));
        assert!(OverlayBuffer::contains(139, 103));
        assert!(!OverlayBuffer::contains(19, 40));
        assert!(!OverlayBuffer::contains(20, 39));
        assert!(!OverlayBuffer::contains(140, 50));
        assert!(!OverlayBuffer::contains(50, 104));
    }

    #[test]
    fn test_set_pixel_ignores_out_of_range() {
        let overlay = OverlayBuffer::new();
        overlay.set_pixel(OVERLAY_WIDTH, 0, 0x3F);
        overlay.set_pixel(1, 2, 0x15);
        assert_eq!(overlay.pixel(1, 2), 0x15);
        assert_eq!(overlay.pixel_at(2 * OVERLAY_WIDTH + 1), 0x15);
    }

    #[test]
    fn test_enable_flag() {
        let overlay = OverlayBuffer::new();
        assert!(!overlay.is_enabled());
        overlay.set_enabled(true);
        assert!(overlay.is_enabled());
    }
}
