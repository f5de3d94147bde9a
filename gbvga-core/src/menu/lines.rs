//! Menu lines and their text

use core::fmt::Write;

use heapless::String;

use crate::settings::Settings;
use crate::traits::Overlay;

/// Characters per menu line
pub const LINE_CHARS: usize = 20;

/// Text of one menu line
pub type LineText = String<LINE_CHARS>;

/// Menu lines, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuLine {
    ColorScheme = 0,
    BorderColor,
    Effects,
    FxScheme,
    ResetConsole,
    Exit,
}

impl MenuLine {
    /// Number of lines
    pub const COUNT: usize = 6;

    /// All lines in display order
    pub const ALL: [MenuLine; Self::COUNT] = [
        MenuLine::ColorScheme,
        MenuLine::BorderColor,
        MenuLine::Effects,
        MenuLine::FxScheme,
        MenuLine::ResetConsole,
        MenuLine::Exit,
    ];

    /// Line at a cursor index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Text for `line` under the current settings
pub fn line_text(line: MenuLine, settings: &Settings) -> LineText {
    let mut text = LineText::new();
    // Longest line is 18 characters, so writes cannot overflow
    let _ = match line {
        MenuLine::ColorScheme => write!(text, "COLOR SCHEME:{:>5}", settings.scheme_index()),
        MenuLine::BorderColor => write!(text, "BORDER COLOR:{:>5}", settings.border_index()),
        MenuLine::Effects => write!(text, "EFFECTS:{:>10}", settings.effect().label()),
        MenuLine::FxScheme => write!(text, "FX SCHEME:{:>8}", settings.accent_offset()),
        MenuLine::ResetConsole => text.push_str("RESET GAMEBOY").map_err(|_| core::fmt::Error),
        MenuLine::Exit => text.push_str("EXIT").map_err(|_| core::fmt::Error),
    };
    text
}

/// Write every line's text into the overlay and re-render it
pub fn render_menu<O: Overlay>(overlay: &mut O, settings: &Settings) {
    for line in MenuLine::ALL {
        overlay.set_line_text(line.index(), &line_text(line, settings));
    }
    overlay.update_framebuffer();
}
