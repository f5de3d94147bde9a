//! Sync timing words for the scanline video generator
//!
//! The timing state machine consumes one 32-bit word per line segment:
//!
//! ```text
//!  31   30                              2   1       0
//! ┌───┬──────────────────────────────────┬───────┬───────┐
//! │irq│ delay (cycles - 5 - irq)         │ vsync │ hsync │
//! └───┴──────────────────────────────────┴───────┴───────┘
//! ```
//!
//! It drives the two sync pins, optionally raises the pixel-start IRQ, then
//! spins for the remaining cycles. Each line is four words: sync pulse, back
//! porch, active period, front porch. The active word raises the IRQ only on
//! visible lines.

use fixed::types::U24F8;
use gbvga_core::config::VideoMode;

/// System clock the firmware runs at
pub const SYS_CLOCK_HZ: u32 = 300_000_000;

/// PIO cycles per output pixel, in both state machines
pub const CYCLES_PER_PIXEL: u32 = 2;

/// Cycles each timing word spends outside its delay loop, IRQ excluded
const TIMING_OVERHEAD: u32 = 5;

/// Encode one timing word lasting `pixels` pixel periods
pub const fn timing_word(pixels: usize, hsync: bool, vsync: bool, raise_irq: bool) -> u32 {
    let irq = raise_irq as u32;
    let delay = pixels as u32 * CYCLES_PER_PIXEL - TIMING_OVERHEAD - irq;
    (irq << 31) | (delay << 2) | ((vsync as u32) << 1) | hsync as u32
}

/// Length of a timing word in PIO cycles
pub const fn word_cycles(word: u32) -> u32 {
    let irq = word >> 31;
    ((word >> 2) & 0x1FFF_FFFF) + TIMING_OVERHEAD + irq
}

/// Clock divider that makes one pixel last [`CYCLES_PER_PIXEL`] PIO cycles
pub fn clock_divider(sys_hz: u32, pixel_clock_hz: u32) -> U24F8 {
    let divisor = pixel_clock_hz as u64 * CYCLES_PER_PIXEL as u64;
    let bits = (sys_hz as u64 * 256) / divisor;
    U24F8::from_bits(bits.min(u32::MAX as u64) as u32)
}

/// Per-line timing words for one output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineTiming {
    mode: VideoMode,
}

impl LineTiming {
    pub const fn new(mode: VideoMode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> &VideoMode {
        &self.mode
    }

    /// The four words for frame line `line` (0 = first visible line)
    pub fn words(&self, line: usize) -> [u32; 4] {
        let m = &self.mode;
        let h_active = !m.h_sync_negative;
        let v_level = m.in_vsync(line) != m.v_sync_negative;
        let visible = line < m.v_active;

        [
            timing_word(m.h_sync, h_active, v_level, false),
            timing_word(m.h_back_porch, !h_active, v_level, false),
            timing_word(m.h_active, !h_active, v_level, visible),
            timing_word(m.h_front_porch, !h_active, v_level, false),
        ]
    }
}
