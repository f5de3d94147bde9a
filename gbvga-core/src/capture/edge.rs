//! Edge detection by polling
//!
//! Waits are spins over a two-state machine: arm on the level before the
//! edge, complete on the level after it. There are no timeouts; a source
//! that stops toggling stalls the caller.

use crate::traits::{LcdBus, LcdLine};

/// Transition to wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

/// Single-edge detector fed one level sample at a time
#[derive(Debug, Clone, Copy)]
pub struct EdgeWait {
    edge: Edge,
    armed: bool,
}

impl EdgeWait {
    pub const fn new(edge: Edge) -> Self {
        Self { edge, armed: false }
    }

    /// Feed one sampled level; true once the edge has been seen
    #[inline(always)]
    pub fn step(&mut self, level: bool) -> bool {
        let before = matches!(self.edge, Edge::Falling);
        if level == before {
            self.armed = true;
            false
        } else {
            self.armed
        }
    }
}

/// Tracks frame sync across rows to spot a new frame starting
///
/// A new frame is reported once frame sync has been seen low and then high
/// again since the watch was created.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSyncWatch {
    seen_low: bool,
}

impl FrameSyncWatch {
    pub const fn new() -> Self {
        Self { seen_low: false }
    }

    /// Feed the frame sync level sampled after a row; true on resync
    #[inline(always)]
    pub fn observe(&mut self, vsync: bool) -> bool {
        if !vsync {
            self.seen_low = true;
        }
        vsync && self.seen_low
    }
}

/// Spin until `line` shows `edge`
#[inline(always)]
pub fn wait_edge<B: LcdBus>(bus: &mut B, line: LcdLine, edge: Edge) {
    let mut wait = EdgeWait::new(edge);
    while !wait.step(bus.level(line)) {}
}

/// Spin until `line` reads `level`
#[inline(always)]
pub fn wait_level<B: LcdBus>(bus: &mut B, line: LcdLine, level: bool) {
    while bus.level(line) != level {}
}
