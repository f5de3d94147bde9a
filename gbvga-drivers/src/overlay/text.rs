//! Text menu overlay
//!
//! Renders the menu's text lines into the shared [`OverlayBuffer`] with the
//! built-in 5x7 font. Each line is a band of [`LINE_PITCH`] pixel rows; the
//! active line is drawn inverted with a `>` cursor in the first column.
//!
//! ```text
//!  ┌────────────────────────────┐
//!  │ COLOR SCHEME:    0         │
//!  │>BORDER COLOR:    3         │  <- inverted band
//!  │ EFFECTS:      NONE         │
//!  └────────────────────────────┘
//! ```

use gbvga_core::menu::{LineText, MenuLine};
use gbvga_core::traits::Overlay;
use gbvga_core::video::palette::{rgb, Color, WHITE};
use gbvga_core::video::OverlayBuffer;

use super::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Horizontal advance per character
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;

/// Vertical distance between line tops
pub const LINE_PITCH: usize = 10;

/// Blank rows above the first line
pub const TOP_MARGIN: usize = 2;

/// Text color
pub const FOREGROUND: Color = WHITE;

/// Panel color
pub const BACKGROUND: Color = rgb(0x00, 0x00, 0x80);

const CURSOR: char = '>';

/// Menu text renderer over the shared overlay buffer
pub struct TextOverlay<'a> {
    buffer: &'a OverlayBuffer,
    lines: [LineText; MenuLine::COUNT],
    active: usize,
}

impl<'a> TextOverlay<'a> {
    /// Create a renderer with empty lines and the cursor on line 0
    pub fn new(buffer: &'a OverlayBuffer) -> Self {
        Self {
            buffer,
            lines: core::array::from_fn(|_| LineText::new()),
            active: 0,
        }
    }

    /// Text of line `index`
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    fn draw_line(&self, index: usize) {
        let top = TOP_MARGIN + index * LINE_PITCH;
        let selected = index == self.active;
        let (fg, bg) = if selected {
            (BACKGROUND, FOREGROUND)
        } else {
            (FOREGROUND, BACKGROUND)
        };

        for y in top..top + LINE_PITCH {
            for x in 0..self.buffer.width() {
                self.buffer.set_pixel(x, y, bg);
            }
        }

        let cursor = if selected { CURSOR } else { ' ' };
        let chars = core::iter::once(cursor).chain(self.lines[index].chars());
        for (col, ch) in chars.take(self.buffer.width() / CELL_WIDTH).enumerate() {
            self.draw_glyph(col * CELL_WIDTH, top + 1, ch, fg);
        }
    }

    fn draw_glyph(&self, left: usize, top: usize, ch: char, color: Color) {
        for (dx, column) in glyph(ch).iter().enumerate() {
            for dy in 0..GLYPH_HEIGHT {
                if column & (1 << dy) != 0 {
                    self.buffer.set_pixel(left + dx, top + dy, color);
                }
            }
        }
    }
}

impl Overlay for TextOverlay<'_> {
    fn is_enabled(&self) -> bool {
        self.buffer.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.buffer.set_enabled(enabled);
    }

    fn active_line(&self) -> usize {
        self.active
    }

    fn set_active_line(&mut self, index: usize) {
        if index < MenuLine::COUNT {
            self.active = index;
        }
    }

    fn change_line(&mut self, direction: i8) {
        let count = MenuLine::COUNT as isize;
        self.active = (self.active as isize + direction as isize).rem_euclid(count) as usize;
    }

    fn set_line_text(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.clear();
            // Keep whole characters while they fit
            for ch in text.chars() {
                if line.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    fn update_framebuffer(&mut self) {
        self.buffer.fill(BACKGROUND);
        for index in 0..MenuLine::COUNT {
            self.draw_line(index);
        }
    }

    fn width(&self) -> usize {
        self.buffer.width()
    }

    fn height(&self) -> usize {
        self.buffer.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbvga_core::config::{OVERLAY_HEIGHT, OVERLAY_WIDTH};
    use gbvga_core::menu::LINE_CHARS;

    #[test]
    fn test_lines_fit_buffer() {
        assert!(TOP_MARGIN + MenuLine::COUNT * LINE_PITCH <= OVERLAY_HEIGHT);
        // longest menu text is 18 characters, plus the cursor cell
        assert!((18 + 1) * CELL_WIDTH <= OVERLAY_WIDTH);
    }

    #[test]
    fn test_cursor_wraps() {
        let buffer = OverlayBuffer::new();
        let mut overlay = TextOverlay::new(&buffer);
        overlay.change_line(-1);
        assert_eq!(overlay.active_line(), MenuLine::COUNT - 1);
        overlay.change_line(1);
        assert_eq!(overlay.active_line(), 0);
        overlay.set_active_line(MenuLine::COUNT);
        assert_eq!(overlay.active_line(), 0);
    }

    #[test]
    fn test_text_is_truncated() {
        let buffer = OverlayBuffer::new();
        let mut overlay = TextOverlay::new(&buffer);
        overlay.set_line_text(2, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(overlay.line(2), Some("ABCDEFGHIJKLMNOPQRST"));
        overlay.set_line_text(9, "ignored");
        assert_eq!(overlay.line(9), None);
    }

    #[test]
    fn test_truncation_keeps_whole_characters() {
        let buffer = OverlayBuffer::new();
        let mut overlay = TextOverlay::new(&buffer);

        // 'É' is two bytes, so byte LINE_CHARS falls inside a character
        overlay.set_line_text(0, "aÉÉÉÉÉÉÉÉÉÉÉ");
        let line = overlay.line(0).unwrap();
        assert!(line.starts_with('a'));
        assert!(line.len() <= LINE_CHARS);
        assert!("aÉÉÉÉÉÉÉÉÉÉÉ".starts_with(line));

        overlay.set_line_text(1, "ÉCRAN ÉCRAN ÉCRAN ÉCRAN");
        assert_eq!(overlay.line(1).unwrap().chars().count(), LINE_CHARS - 3);
    }

    #[test]
    fn test_enable_goes_to_buffer() {
        let buffer = OverlayBuffer::new();
        let mut overlay = TextOverlay::new(&buffer);
        overlay.toggle();
        assert!(buffer.is_enabled());
        overlay.toggle();
        assert!(!buffer.is_enabled());
    }

    #[test]
    fn test_render_draws_glyphs_and_highlight() {
        let buffer = OverlayBuffer::new();
        let mut overlay = TextOverlay::new(&buffer);
        overlay.set_line_text(1, "I");
        overlay.set_active_line(0);
        overlay.update_framebuffer();

        // line 0 is selected and empty apart from the cursor: inverted band
        assert_eq!(buffer.pixel(OVERLAY_WIDTH - 1, TOP_MARGIN), FOREGROUND);
        // '>' column 0 has bits 0 and 6 set
        assert_eq!(buffer.pixel(0, TOP_MARGIN + 1), BACKGROUND);
        assert_eq!(buffer.pixel(0, TOP_MARGIN + 2), FOREGROUND);

        // line 1: 'I' in the second cell, middle column fully lit
        let top = TOP_MARGIN + LINE_PITCH + 1;
        for dy in 0..GLYPH_HEIGHT {
            assert_eq!(buffer.pixel(CELL_WIDTH + 2, top + dy), FOREGROUND);
        }
        assert_eq!(buffer.pixel(CELL_WIDTH + 2, top + GLYPH_HEIGHT), BACKGROUND);
        // margin rows keep the panel color
        assert_eq!(buffer.pixel(5, 0), BACKGROUND);
    }
}
