//! Runtime video settings
//!
//! A single [`Settings`] object is shared by the dispatcher (the only writer)
//! and the compositor (reader). Every field is a `Relaxed` atomic, so each
//! value is read whole but the four values are not read as one unit; the
//! compositor takes a [`SettingsSnapshot`] once per line.

use portable_atomic::{AtomicU8, Ordering};

use crate::video::palette::{Color, BORDER_COLORS, SCHEMES, SCHEME_SIZE};

/// Visual effect blended into the game area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum VideoEffect {
    /// Plain upscale
    #[default]
    None = 0,
    /// Accent color on the first row and last column of every scaled pixel
    PixelEffect = 1,
    /// Accent color on the first row of every scaled pixel
    Scanlines = 2,
}

impl VideoEffect {
    /// Number of effect modes
    pub const COUNT: usize = 3;

    /// Convert from the stored discriminant, falling back to `None`
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::PixelEffect,
            2 => Self::Scanlines,
            _ => Self::None,
        }
    }

    /// Whether accent rows are drawn
    pub const fn has_accent_rows(self) -> bool {
        matches!(self, Self::PixelEffect | Self::Scanlines)
    }

    /// Menu label
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::PixelEffect => "PIXELS",
            Self::Scanlines => "SCANLINES",
        }
    }
}

/// Number of accent offsets within a scheme
pub const ACCENT_COUNT: usize = SCHEME_SIZE;

/// Step `value` by `direction` within `0..count`, wrapping at both ends
fn wrap_step(value: usize, direction: i8, count: usize) -> usize {
    (value as isize + direction as isize).rem_euclid(count as isize) as usize
}

/// Shared video settings
pub struct Settings {
    scheme_offset: AtomicU8,
    border_index: AtomicU8,
    effect: AtomicU8,
    accent_offset: AtomicU8,
}

impl Settings {
    /// Boot defaults: scheme 0, border 0, no effect, accent 0
    pub const fn new() -> Self {
        Self {
            scheme_offset: AtomicU8::new(0),
            border_index: AtomicU8::new(0),
            effect: AtomicU8::new(VideoEffect::None as u8),
            accent_offset: AtomicU8::new(0),
        }
    }

    /// Offset of the active scheme in the palette; always a multiple of the
    /// scheme size
    pub fn scheme_offset(&self) -> usize {
        self.scheme_offset.load(Ordering::Relaxed) as usize
    }

    /// Index of the active scheme
    pub fn scheme_index(&self) -> usize {
        self.scheme_offset() / SCHEME_SIZE
    }

    pub fn border_index(&self) -> usize {
        self.border_index.load(Ordering::Relaxed) as usize
    }

    pub fn effect(&self) -> VideoEffect {
        VideoEffect::from_u8(self.effect.load(Ordering::Relaxed))
    }

    pub fn accent_offset(&self) -> usize {
        self.accent_offset.load(Ordering::Relaxed) as usize
    }

    /// Move to the next (`+1`) or previous (`-1`) scheme
    pub fn change_scheme(&self, direction: i8) {
        let schemes = SCHEMES.len() / SCHEME_SIZE;
        let index = wrap_step(self.scheme_index(), direction, schemes);
        self.scheme_offset
            .store((index * SCHEME_SIZE) as u8, Ordering::Relaxed);
    }

    /// Move to the next or previous border color
    pub fn change_border(&self, direction: i8) {
        let index = wrap_step(self.border_index(), direction, BORDER_COLORS.len());
        self.border_index.store(index as u8, Ordering::Relaxed);
    }

    /// Cycle the effect mode
    pub fn change_effect(&self, direction: i8) {
        let index = wrap_step(self.effect() as usize, direction, VideoEffect::COUNT);
        self.effect.store(index as u8, Ordering::Relaxed);
    }

    /// Cycle the accent offset within the active scheme
    pub fn change_accent(&self, direction: i8) {
        let index = wrap_step(self.accent_offset(), direction, ACCENT_COUNT);
        self.accent_offset.store(index as u8, Ordering::Relaxed);
    }

    /// Copy all four values
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            scheme_offset: self.scheme_offset(),
            border_index: self.border_index(),
            effect: self.effect(),
            accent_offset: self.accent_offset(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`Settings`] with the derived colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsSnapshot {
    pub scheme_offset: usize,
    pub border_index: usize,
    pub effect: VideoEffect,
    pub accent_offset: usize,
}

impl SettingsSnapshot {
    /// Color for a 2-bit source sample under the active scheme
    #[inline(always)]
    pub fn shade(&self, sample: u8) -> Color {
        SCHEMES[self.scheme_offset + (sample as usize & (SCHEME_SIZE - 1))]
    }

    /// Active border color
    #[inline(always)]
    pub fn border_color(&self) -> Color {
        BORDER_COLORS[self.border_index]
    }

    /// Active accent color, taken from the active scheme
    #[inline(always)]
    pub fn accent_color(&self) -> Color {
        SCHEMES[self.scheme_offset + self.accent_offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::palette::SCHEME_COUNT;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let s = Settings::new();
        assert_eq!(
            s.snapshot(),
            SettingsSnapshot {
                scheme_offset: 0,
                border_index: 0,
                effect: VideoEffect::None,
                accent_offset: 0,
            }
        );
    }

    #[test]
    fn test_scheme_wraps_both_ways() {
        let s = Settings::new();
        s.change_scheme(-1);
        assert_eq!(s.scheme_offset(), SCHEMES.len() - SCHEME_SIZE);
        s.change_scheme(1);
        assert_eq!(s.scheme_offset(), 0);
        s.change_scheme(1);
        assert_eq!(s.scheme_offset(), SCHEME_SIZE);
    }

    #[test]
    fn test_border_wraps() {
        let s = Settings::new();
        s.change_border(-1);
        assert_eq!(s.border_index(), BORDER_COLORS.len() - 1);
        s.change_border(1);
        assert_eq!(s.border_index(), 0);
    }

    #[test]
    fn test_effect_cycles() {
        let s = Settings::new();
        s.change_effect(1);
        assert_eq!(s.effect(), VideoEffect::PixelEffect);
        s.change_effect(1);
        assert_eq!(s.effect(), VideoEffect::Scanlines);
        s.change_effect(1);
        assert_eq!(s.effect(), VideoEffect::None);
        s.change_effect(-1);
        assert_eq!(s.effect(), VideoEffect::Scanlines);
    }

    #[test]
    fn test_accent_follows_scheme() {
        let s = Settings::new();
        s.change_accent(-1);
        assert_eq!(s.accent_offset(), 3);
        assert_eq!(s.snapshot().accent_color(), SCHEMES[3]);

        // accent is derived from the live scheme, not cached
        s.change_scheme(1);
        assert_eq!(s.snapshot().accent_color(), SCHEMES[SCHEME_SIZE + 3]);
    }

    #[test]
    fn test_shade_uses_scheme_block() {
        let s = Settings::new();
        s.change_scheme(1);
        s.change_scheme(1);
        let snap = s.snapshot();
        for sample in 0..4u8 {
            assert_eq!(snap.shade(sample), SCHEMES[2 * SCHEME_SIZE + sample as usize]);
        }
    }

    proptest! {
        #[test]
        fn prop_scheme_offset_stays_aligned(steps in prop::collection::vec(prop::bool::ANY, 0..400)) {
            let s = Settings::new();
            for forward in steps {
                s.change_scheme(if forward { 1 } else { -1 });
                let offset = s.scheme_offset();
                prop_assert_eq!(offset % SCHEME_SIZE, 0);
                prop_assert!(offset < SCHEMES.len());
                prop_assert!(s.scheme_index() < SCHEME_COUNT);
            }
        }

        #[test]
        fn prop_step_then_back_restores(start in 0usize..200, forward in prop::bool::ANY) {
            let s = Settings::new();
            let (a, b) = if forward { (1, -1) } else { (-1, 1) };
            for _ in 0..start {
                s.change_scheme(1);
                s.change_border(1);
            }
            let before = s.snapshot();
            s.change_scheme(a);
            s.change_scheme(b);
            s.change_border(a);
            s.change_border(b);
            s.change_effect(a);
            s.change_effect(b);
            s.change_accent(a);
            s.change_accent(b);
            prop_assert_eq!(s.snapshot(), before);
        }

        #[test]
        fn prop_indices_stay_in_range(steps in prop::collection::vec(-1i8..=1, 0..100)) {
            let s = Settings::new();
            for step in steps {
                s.change_border(step);
                s.change_effect(step);
                s.change_accent(step);
                prop_assert!(s.border_index() < BORDER_COLORS.len());
                prop_assert!((s.effect() as usize) < VideoEffect::COUNT);
                prop_assert!(s.accent_offset() < ACCENT_COUNT);
            }
        }
    }
}
