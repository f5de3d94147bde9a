//! LCD bus sampling trait

/// Timing lines of the console's LCD bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdLine {
    /// Pixel clock; data is valid after its falling edge
    PixelClock,
    /// Line sync; a pulse precedes every row
    HSync,
    /// Frame sync; high during the first row of a frame
    VSync,
}

/// Raw access to the LCD bus
///
/// Called from spin loops with nothing in between, so every method should
/// compile down to a register read.
pub trait LcdBus {
    /// Current level of a timing line
    fn level(&mut self, line: LcdLine) -> bool;

    /// Current 2-bit pixel value, `(D0 << 1) | D1`
    fn sample(&mut self) -> u8;
}
