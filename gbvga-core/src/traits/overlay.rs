//! On-screen menu trait

/// On-screen menu renderer
///
/// The renderer owns a fixed set of text lines and a cursor. Text changes
/// take effect in the pixel buffer on the next [`update_framebuffer`].
///
/// [`update_framebuffer`]: Overlay::update_framebuffer
pub trait Overlay {
    /// Whether the menu is shown
    fn is_enabled(&self) -> bool;

    /// Show or hide the menu
    fn set_enabled(&mut self, enabled: bool);

    /// Flip visibility
    fn toggle(&mut self) {
        let enabled = self.is_enabled();
        self.set_enabled(!enabled);
    }

    /// Index of the highlighted line
    fn active_line(&self) -> usize;

    /// Move the cursor to `index`
    fn set_active_line(&mut self, index: usize);

    /// Move the cursor by `direction` lines, wrapping around
    fn change_line(&mut self, direction: i8);

    /// Replace the text of line `index`
    fn set_line_text(&mut self, index: usize, text: &str);

    /// Re-render all lines into the pixel buffer
    fn update_framebuffer(&mut self);

    /// Pixel buffer width
    fn width(&self) -> usize;

    /// Pixel buffer height
    fn height(&self) -> usize;
}
