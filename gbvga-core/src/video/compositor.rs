//! Scanline compositor
//!
//! Builds one encoded output line from the framebuffer, the overlay and the
//! current settings. Called once per visible line by the display timing
//! generator and must finish before the next request, so it does no
//! allocation, no logging and no waiting.
//!
//! Line layout (left to right):
//!
//! ```text
//! | border (BORDER_HORZ-1) | game area (GAME_WIDTH) | border (BORDER_HORZ) | black 1px | EOL |
//! ```
//!
//! The game area is a solid run on border and accent rows and a raw run of
//! upscaled source pixels otherwise.

use portable_atomic::Ordering;

use crate::config::{
    BORDER_HORZ, BORDER_VERT, GAME_HEIGHT, GAME_WIDTH, OVERLAY_WIDTH, OVERLAY_X, OVERLAY_Y,
    PIXEL_SCALE,
};
use crate::settings::{Settings, SettingsSnapshot, VideoEffect};

use super::encoding::{DecodeError, ScanlineBuffer};
use super::framebuffer::Framebuffer;
use super::maps::CoordinateMaps;
use super::overlay::OverlayBuffer;
use super::palette::{Color, BLACK};

/// Which kind of line was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineKind {
    /// Above or below the game area; solid border color
    Border,
    /// Effect row inside the game area; solid accent color
    Accent,
    /// Textured game row sampling source row `source_y`
    Game { source_y: usize },
}

/// Geometry self-check failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Output line `line` is not a valid token stream
    Decode { line: usize, error: DecodeError },
    /// Output line `line` decodes to `width` pixels
    Width { line: usize, width: usize },
}

/// Decide what output line `line` shows under `effect`
pub fn classify(line: usize, effect: VideoEffect, maps: &CoordinateMaps) -> LineKind {
    if line < BORDER_VERT || line >= BORDER_VERT + GAME_HEIGHT {
        LineKind::Border
    } else if effect.has_accent_rows() && line % PIXEL_SCALE == 0 {
        LineKind::Accent
    } else {
        LineKind::Game {
            source_y: maps.source_y(line - BORDER_VERT),
        }
    }
}

/// Scanline compositor over the shared video state
pub struct Compositor<'a> {
    framebuffer: &'a Framebuffer,
    overlay: &'a OverlayBuffer,
    settings: &'a Settings,
    maps: &'a CoordinateMaps,
}

impl<'a> Compositor<'a> {
    pub const fn new(
        framebuffer: &'a Framebuffer,
        overlay: &'a OverlayBuffer,
        settings: &'a Settings,
        maps: &'a CoordinateMaps,
    ) -> Self {
        Self {
            framebuffer,
            overlay,
            settings,
            maps,
        }
    }

    /// Encode output line `line` into `buf`, replacing its contents
    pub fn render(&self, line: usize, buf: &mut ScanlineBuffer) -> LineKind {
        let settings = self.settings.snapshot();
        let kind = classify(line, settings.effect, self.maps);

        buf.clear();
        match kind {
            LineKind::Border => solid_line(buf, &settings, settings.border_color()),
            LineKind::Accent => solid_line(buf, &settings, settings.accent_color()),
            LineKind::Game { source_y } => self.game_line(buf, &settings, source_y),
        }
        kind
    }

    /// Render one border line and one game line into `buf` and check that
    /// both decode to exactly `width` pixels
    pub fn check_geometry(
        &self,
        width: usize,
        buf: &mut ScanlineBuffer,
    ) -> Result<(), GeometryError> {
        // BORDER_VERT + 1 is never an accent row
        for line in [0, BORDER_VERT + 1] {
            self.render(line, buf);
            match buf.decoded_width() {
                Ok(decoded) if decoded == width => {}
                Ok(decoded) => return Err(GeometryError::Width { line, width: decoded }),
                Err(error) => return Err(GeometryError::Decode { line, error }),
            }
        }
        Ok(())
    }

    fn game_line(&self, buf: &mut ScanlineBuffer, settings: &SettingsSnapshot, source_y: usize) {
        let row = self.framebuffer.row(source_y);
        let overlay_row = self.overlay.is_enabled() && OverlayBuffer::covers_row(source_y);
        let overlay_base = if overlay_row {
            (source_y - OVERLAY_Y) * OVERLAY_WIDTH
        } else {
            0
        };
        let pixel_effect = settings.effect == VideoEffect::PixelEffect;
        let accent = settings.accent_color();

        buf.color_run(settings.border_color(), BORDER_HORZ - 1);

        let mut run = buf.raw_run(GAME_WIDTH);
        for (x, cell) in row.iter().enumerate() {
            // Color of sub-pixels 0..SCALE-1, and of the last sub-pixel
            let (color, last): (Color, Color) =
                if overlay_row && OverlayBuffer::covers_column(x) {
                    let px = self.overlay.pixel_at(overlay_base + x - OVERLAY_X);
                    (px, px)
                } else {
                    let shade = settings.shade(cell.load(Ordering::Relaxed));
                    (shade, if pixel_effect { accent } else { shade })
                };

            if x == 0 {
                run.set_first(color);
            } else {
                run.push(color);
            }
            for _ in 1..PIXEL_SCALE - 1 {
                run.push(color);
            }
            run.push(last);
        }

        buf.color_run(settings.border_color(), BORDER_HORZ);
        buf.raw_1p(BLACK);
        buf.end_line();
    }
}

fn solid_line(buf: &mut ScanlineBuffer, settings: &SettingsSnapshot, color: Color) {
    buf.color_run(settings.border_color(), BORDER_HORZ - 1);
    buf.color_run(color, GAME_WIDTH);
    buf.color_run(settings.border_color(), BORDER_HORZ);
    buf.raw_1p(BLACK);
    buf.end_line();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OUTPUT_HEIGHT, OUTPUT_WIDTH, OVERLAY_HEIGHT, SOURCE_HEIGHT, SOURCE_WIDTH};
    use crate::video::encoding::{op, SCANLINE_WORDS};
    use crate::video::palette::SCHEMES;

    const GAME_START: usize = BORDER_HORZ - 1;

    struct Fixture {
        framebuffer: Framebuffer,
        overlay: OverlayBuffer,
        settings: Settings,
        maps: CoordinateMaps,
    }

    impl Fixture {
        fn new() -> Box<Self> {
            Box::new(Self {
                framebuffer: Framebuffer::new(),
                overlay: OverlayBuffer::new(),
                settings: Settings::new(),
                maps: CoordinateMaps::new(),
            })
        }

        fn compositor(&self) -> Compositor<'_> {
            Compositor::new(&self.framebuffer, &self.overlay, &self.settings, &self.maps)
        }

        /// Fill the framebuffer with a deterministic non-uniform pattern
        fn scramble(&self) {
            let mut seed: u32 = 0x1234_5678;
            for y in 0..SOURCE_HEIGHT {
                for x in 0..SOURCE_WIDTH {
                    seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    self.framebuffer.store(x, y, (seed >> 24) as u8);
                }
            }
        }

        fn render_pixels(&self, line: usize) -> (LineKind, Vec<Color>) {
            let mut buf = ScanlineBuffer::new();
            let kind = self.compositor().render(line, &mut buf);
            let mut out = Vec::new();
            buf.for_each_pixel(|c| out.push(c)).unwrap();
            (kind, out)
        }
    }

    fn game_line_for(source_y: usize) -> usize {
        // first row of the triple is an accent row under effects; use the second
        BORDER_VERT + source_y * PIXEL_SCALE + 1
    }

    #[test]
    fn test_classify() {
        let maps = CoordinateMaps::new();
        assert_eq!(classify(0, VideoEffect::None, &maps), LineKind::Border);
        assert_eq!(classify(BORDER_VERT - 1, VideoEffect::None, &maps), LineKind::Border);
        assert_eq!(
            classify(BORDER_VERT, VideoEffect::None, &maps),
            LineKind::Game { source_y: 0 }
        );
        assert_eq!(classify(BORDER_VERT, VideoEffect::Scanlines, &maps), LineKind::Accent);
        assert_eq!(classify(BORDER_VERT, VideoEffect::PixelEffect, &maps), LineKind::Accent);
        assert_eq!(
            classify(BORDER_VERT + 5, VideoEffect::Scanlines, &maps),
            LineKind::Game { source_y: 1 }
        );
        assert_eq!(
            classify(BORDER_VERT + GAME_HEIGHT - 1, VideoEffect::None, &maps),
            LineKind::Game { source_y: SOURCE_HEIGHT - 1 }
        );
        assert_eq!(classify(BORDER_VERT + GAME_HEIGHT, VideoEffect::None, &maps), LineKind::Border);
        assert_eq!(classify(OUTPUT_HEIGHT - 1, VideoEffect::Scanlines, &maps), LineKind::Border);
    }

    #[test]
    fn test_every_line_decodes_to_output_width() {
        let fx = Fixture::new();
        fx.scramble();
        let mut buf = ScanlineBuffer::new();

        for _ in 0..VideoEffect::COUNT {
            for overlay in [false, true] {
                fx.overlay.set_enabled(overlay);
                for line in 0..OUTPUT_HEIGHT {
                    fx.compositor().render(line, &mut buf);
                    assert_eq!(buf.decoded_width(), Ok(OUTPUT_WIDTH), "line {line}");
                    assert!(buf.words().len() <= SCANLINE_WORDS);
                    assert_eq!(buf.len_tokens() % 2, 0);
                }
            }
            fx.settings.change_effect(1);
        }
    }

    #[test]
    fn test_geometry_check() {
        let f = Fixture::new();
        let c = f.compositor();
        let mut buf = ScanlineBuffer::new();
        for _ in 0..VideoEffect::COUNT {
            assert_eq!(c.check_geometry(OUTPUT_WIDTH, &mut buf), Ok(()));
            f.settings.change_effect(1);
        }
        assert_eq!(
            c.check_geometry(OUTPUT_WIDTH + 1, &mut buf),
            Err(GeometryError::Width {
                line: 0,
                width: OUTPUT_WIDTH
            })
        );
    }

    #[test]
    fn test_border_line_is_solid_border() {
        let fx = Fixture::new();
        fx.settings.change_border(1);
        let border = fx.settings.snapshot().border_color();
        let (kind, px) = fx.render_pixels(0);
        assert_eq!(kind, LineKind::Border);
        assert!(px[..OUTPUT_WIDTH - 1].iter().all(|c| *c == border));
        assert_eq!(px[OUTPUT_WIDTH - 1], BLACK);
    }

    #[test]
    fn test_accent_row_uses_accent_color() {
        let fx = Fixture::new();
        fx.scramble();
        fx.settings.change_effect(-1); // Scanlines
        fx.settings.change_accent(1);
        let snap = fx.settings.snapshot();

        let (kind, px) = fx.render_pixels(BORDER_VERT + 3 * PIXEL_SCALE);
        assert_eq!(kind, LineKind::Accent);
        assert!(px[GAME_START..GAME_START + GAME_WIDTH]
            .iter()
            .all(|c| *c == snap.accent_color()));
        assert!(px[..GAME_START].iter().all(|c| *c == snap.border_color()));
    }

    #[test]
    fn test_pixel_effect_marks_last_subpixel() {
        let fx = Fixture::new();
        fx.scramble();
        fx.settings.change_effect(1); // PixelEffect
        fx.settings.change_accent(-1);
        let snap = fx.settings.snapshot();

        for source_y in [0, 17, SOURCE_HEIGHT - 1] {
            let (kind, px) = fx.render_pixels(game_line_for(source_y));
            assert_eq!(kind, LineKind::Game { source_y });
            let game = &px[GAME_START..GAME_START + GAME_WIDTH];
            for (i, color) in game.iter().enumerate() {
                let x = fx.maps.source_x(i);
                if i % PIXEL_SCALE == PIXEL_SCALE - 1 {
                    assert_eq!(*color, snap.accent_color());
                } else {
                    assert_eq!(*color, snap.shade(fx.framebuffer.load(x, source_y)));
                }
            }
        }
    }

    #[test]
    fn test_overlay_substitutes_inside_rectangle_only() {
        let fx = Fixture::new();
        fx.scramble();
        for y in 0..OVERLAY_HEIGHT {
            for x in 0..OVERLAY_WIDTH {
                fx.overlay.set_pixel(x, y, ((x + y) % 64) as Color);
            }
        }
        // overlay wins over the pixel effect
        fx.settings.change_effect(1);
        fx.overlay.set_enabled(true);
        let snap = fx.settings.snapshot();

        for source_y in 0..SOURCE_HEIGHT {
            let (_, px) = fx.render_pixels(game_line_for(source_y));
            let game = &px[GAME_START..GAME_START + GAME_WIDTH];
            for (i, color) in game.iter().enumerate() {
                let x = fx.maps.source_x(i);
                let expected = if OverlayBuffer::contains(x, source_y) {
                    fx.overlay.pixel(x - OVERLAY_X, source_y - OVERLAY_Y)
                } else if i % PIXEL_SCALE == PIXEL_SCALE - 1 {
                    snap.accent_color()
                } else {
                    snap.shade(fx.framebuffer.load(x, source_y))
                };
                assert_eq!(*color, expected, "x {x} y {source_y}");
            }
            // borders untouched
            assert!(px[..GAME_START].iter().all(|c| *c == snap.border_color()));
        }
    }

    #[test]
    fn test_disabled_overlay_is_invisible() {
        let fx = Fixture::new();
        fx.overlay.fill(0x3F);
        let (_, px) = fx.render_pixels(BORDER_VERT + OVERLAY_Y * PIXEL_SCALE + 1);
        assert!(px[GAME_START..GAME_START + GAME_WIDTH]
            .iter()
            .all(|c| *c == SCHEMES[0]));
    }

    #[test]
    fn test_blank_row_encodes_exactly() {
        let fx = Fixture::new();
        let border = fx.settings.snapshot().border_color();
        let shade = SCHEMES[0];

        let mut buf = ScanlineBuffer::new();
        let kind = fx.compositor().render(BORDER_VERT, &mut buf);
        assert_eq!(kind, LineKind::Game { source_y: 0 });

        let mut expected = vec![
            op::COLOR_RUN,
            border,
            (BORDER_HORZ - 1 - 3) as u16,
            op::RAW_RUN,
            shade,
            (GAME_WIDTH - 3) as u16,
        ];
        expected.extend(core::iter::repeat(shade).take(GAME_WIDTH - 1));
        expected.extend([op::COLOR_RUN, border, (BORDER_HORZ - 3) as u16]);
        expected.extend([op::RAW_1P, BLACK]);
        expected.extend([op::EOL_ALIGN, 0]);

        assert_eq!(buf.tokens().collect::<Vec<_>>(), expected);
    }
}
