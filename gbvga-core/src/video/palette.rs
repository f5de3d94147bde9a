//! Color tables
//!
//! Colors are RGB222: two bits per channel, packed `0b00BB_GGRR` to match the
//! six color pins of the output DAC. Source samples are 2-bit shade indices
//! mapped through a 4-entry block of [`SCHEMES`].

/// An output color as carried in the scanline token stream
pub type Color = u16;

/// Bit position of the red channel
pub const RED_SHIFT: u16 = 0;

/// Bit position of the green channel
pub const GREEN_SHIFT: u16 = 2;

/// Bit position of the blue channel
pub const BLUE_SHIFT: u16 = 4;

/// Number of colors in one scheme
pub const SCHEME_SIZE: usize = 4;

/// Pack an 8-bit-per-channel color into RGB222
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    (((b >> 6) as u16) << BLUE_SHIFT) | (((g >> 6) as u16) << GREEN_SHIFT) | (((r >> 6) as u16) << RED_SHIFT)
}

/// Solid black
pub const BLACK: Color = rgb(0x00, 0x00, 0x00);

/// Solid white
pub const WHITE: Color = rgb(0xFF, 0xFF, 0xFF);

/// Shade schemes, one block of [`SCHEME_SIZE`] colors per scheme,
/// ordered lightest to darkest shade index
pub static SCHEMES: [Color; 148] = [
    // Black and white
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0x4E, 0x4C, 0x4E),
    rgb(0x00, 0x00, 0x00),
    // Inverted
    rgb(0x00, 0x00, 0x00),
    rgb(0x4E, 0x4C, 0x4E),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0xF7, 0xF3, 0xF7),
    // DMG
    rgb(0x7B, 0x82, 0x10),
    rgb(0x5A, 0x79, 0x42),
    rgb(0x39, 0x59, 0x4A),
    rgb(0x29, 0x41, 0x39),
    // Pocket
    rgb(0xC6, 0xCB, 0xA5),
    rgb(0x8C, 0x92, 0x6B),
    rgb(0x4A, 0x51, 0x39),
    rgb(0x18, 0x18, 0x18),
    // Light
    rgb(0x00, 0xB2, 0x84),
    rgb(0x8C, 0x92, 0x6B),
    rgb(0x00, 0x69, 0x4A),
    rgb(0x00, 0x51, 0x39),
    // SGB 1A
    rgb(0xF7, 0xE3, 0xC6),
    rgb(0xD6, 0x92, 0x4A),
    rgb(0xA5, 0x28, 0x21),
    rgb(0x31, 0x18, 0x52),
    // SGB 2A
    rgb(0xEF, 0xC3, 0x9C),
    rgb(0xBD, 0x8A, 0x4A),
    rgb(0x29, 0x79, 0x00),
    rgb(0x00, 0x00, 0x00),
    // SGB 3A
    rgb(0xF7, 0xCB, 0x94),
    rgb(0x73, 0xBA, 0xBD),
    rgb(0xF7, 0x61, 0x29),
    rgb(0x31, 0x49, 0x63),
    // SGB 4A
    rgb(0xEF, 0xA2, 0x6B),
    rgb(0x7B, 0xA2, 0xF7),
    rgb(0xCE, 0x00, 0xCE),
    rgb(0x00, 0x00, 0x7B),
    // SGB 1B
    rgb(0xD6, 0xD3, 0xBD),
    rgb(0xC6, 0xAA, 0x73),
    rgb(0xAD, 0x51, 0x10),
    rgb(0x00, 0x00, 0x00),
    // SGB 2B
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xF7, 0xE3, 0x52),
    rgb(0xF7, 0x30, 0x00),
    rgb(0x52, 0x00, 0x5A),
    // SGB 3B
    rgb(0xD6, 0xD3, 0xBD),
    rgb(0xDE, 0x82, 0x21),
    rgb(0x00, 0x51, 0x00),
    rgb(0x00, 0x10, 0x10),
    // SGB 4B
    rgb(0xEF, 0xE3, 0xEF),
    rgb(0xE7, 0x9A, 0x63),
    rgb(0x42, 0x79, 0x39),
    rgb(0x18, 0x08, 0x08),
    // SGB 1C
    rgb(0xF7, 0xBA, 0xF7),
    rgb(0xE7, 0x92, 0x52),
    rgb(0x94, 0x38, 0x63),
    rgb(0x39, 0x38, 0x94),
    // SGB 2C
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xE7, 0x8A, 0x8C),
    rgb(0x7B, 0x30, 0xE7),
    rgb(0x29, 0x28, 0x94),
    // SGB 3C
    rgb(0xDE, 0xA2, 0xC6),
    rgb(0xF7, 0xF3, 0x7B),
    rgb(0x00, 0xB2, 0xF7),
    rgb(0x21, 0x20, 0x5A),
    // SGB 4C
    rgb(0xF7, 0xDB, 0xDE),
    rgb(0xF7, 0xF3, 0x7B),
    rgb(0x94, 0x9A, 0xDE),
    rgb(0x08, 0x00, 0x00),
    // SGB 1D
    rgb(0xF7, 0xF3, 0xA5),
    rgb(0xBD, 0x82, 0x4A),
    rgb(0xF7, 0x00, 0x00),
    rgb(0x52, 0x18, 0x00),
    // SGB 2D
    rgb(0xF7, 0xF3, 0x9C),
    rgb(0x00, 0xF3, 0x00),
    rgb(0xF7, 0x30, 0x00),
    rgb(0x00, 0x00, 0x52),
    // SGB 3D
    rgb(0xEF, 0xF3, 0xB5),
    rgb(0xDE, 0xA2, 0x7B),
    rgb(0x96, 0xAD, 0x52),
    rgb(0x00, 0x00, 0x00),
    // SGB 4D
    rgb(0xF7, 0xF3, 0xB5),
    rgb(0x94, 0xC3, 0xC6),
    rgb(0x4A, 0x69, 0x7B),
    rgb(0x08, 0x20, 0x4A),
    // SGB 1E
    rgb(0xF7, 0xD3, 0xAD),
    rgb(0x7B, 0xBA, 0x7B),
    rgb(0x6B, 0x8A, 0x42),
    rgb(0x5A, 0x38, 0x21),
    // SGB 2E
    rgb(0xF7, 0xC3, 0x84),
    rgb(0x94, 0xAA, 0xDE),
    rgb(0x29, 0x10, 0x63),
    rgb(0x10, 0x08, 0x10),
    // SGB 3E
    rgb(0xF7, 0xF3, 0xBD),
    rgb(0xDE, 0xAA, 0x6B),
    rgb(0xAD, 0x79, 0x21),
    rgb(0x52, 0x49, 0x73),
    // SGB 4E
    rgb(0xF7, 0xD3, 0xA5),
    rgb(0xDE, 0xA2, 0x7B),
    rgb(0x7B, 0x59, 0x8C),
    rgb(0x00, 0x20, 0x31),
    // SGB 1F
    rgb(0xD6, 0xE3, 0xF7),
    rgb(0xDE, 0x8A, 0x52),
    rgb(0xA5, 0x00, 0x00),
    rgb(0x00, 0x41, 0x10),
    // SGB 2F
    rgb(0xCE, 0xF3, 0xF7),
    rgb(0xF7, 0x92, 0x52),
    rgb(0x9C, 0x00, 0x00),
    rgb(0x18, 0x00, 0x00),
    // SGB 3F
    rgb(0x7B, 0x79, 0xC6),
    rgb(0xF7, 0x69, 0xF7),
    rgb(0xF7, 0xCB, 0x00),
    rgb(0x42, 0x41, 0x42),
    // SGB 4F
    rgb(0xB5, 0xCB, 0xCE),
    rgb(0xD6, 0x82, 0xD6),
    rgb(0x84, 0x00, 0x9C),
    rgb(0x39, 0x00, 0x00),
    // SGB 1G
    rgb(0x00, 0x00, 0x52),
    rgb(0x00, 0x9A, 0xE7),
    rgb(0x7B, 0x79, 0x00),
    rgb(0xF7, 0xF3, 0x5A),
    // SGB 2G
    rgb(0x6B, 0xB2, 0x39),
    rgb(0xDE, 0x51, 0x42),
    rgb(0xDE, 0xB2, 0x84),
    rgb(0x00, 0x18, 0x00),
    // SGB 3G
    rgb(0x63, 0xD3, 0x52),
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xC6, 0x30, 0x39),
    rgb(0x39, 0x00, 0x00),
    // SGB 4G
    rgb(0xAD, 0xDB, 0x18),
    rgb(0xB5, 0x20, 0x5A),
    rgb(0x29, 0x10, 0x00),
    rgb(0x00, 0x82, 0x63),
    // SGB 1H
    rgb(0xF7, 0xE3, 0xDE),
    rgb(0xF7, 0xB2, 0x8C),
    rgb(0x84, 0x41, 0x00),
    rgb(0x31, 0x18, 0x00),
    // SGB 2H
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0x73, 0x71, 0x73),
    rgb(0x00, 0x00, 0x00),
    // SGB 3H
    rgb(0xDE, 0xF3, 0x9C),
    rgb(0x7B, 0xC3, 0x39),
    rgb(0x4A, 0x8A, 0x18),
    rgb(0x08, 0x18, 0x00),
    // SGB 4H
    rgb(0xF7, 0xF3, 0xC6),
    rgb(0xB5, 0xBA, 0x5A),
    rgb(0x84, 0x8A, 0x42),
    rgb(0x42, 0x51, 0x29),
];

/// Number of selectable schemes
pub const SCHEME_COUNT: usize = SCHEMES.len() / SCHEME_SIZE;

const _: () = assert!(SCHEMES.len() % SCHEME_SIZE == 0);

/// Selectable border colors
pub static BORDER_COLORS: [Color; 9] = [
    rgb(0x00, 0x00, 0x00), // Black
    rgb(0x00, 0x00, 0xFF), // Blue
    rgb(0xFF, 0xFF, 0xFF), // White
    rgb(0x80, 0x80, 0x80), // Light grey
    rgb(0x40, 0x40, 0x40), // Dark grey
    rgb(0xFF, 0x00, 0x00), // Red
    rgb(0x00, 0xFF, 0x00), // Green
    rgb(0xFF, 0xFF, 0x00), // Yellow
    rgb(0xFF, 0x00, 0xFF), // Purple
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        assert_eq!(rgb(0xFF, 0x00, 0x00), 0b00_00_11);
        assert_eq!(rgb(0x00, 0xFF, 0x00), 0b00_11_00);
        assert_eq!(rgb(0x00, 0x00, 0xFF), 0b11_00_00);
        assert_eq!(rgb(0x80, 0x40, 0xC0), 0b11_01_10);
        assert_eq!(WHITE, 0x3F);
        assert_eq!(BLACK, 0);
    }

    #[test]
    fn test_tables_fit_six_bits() {
        for color in SCHEMES.iter().chain(BORDER_COLORS.iter()) {
            assert!(*color <= 0x3F);
        }
    }

    #[test]
    fn test_first_scheme_is_grayscale_light_to_dark() {
        assert_eq!(SCHEMES[0], WHITE);
        assert_eq!(SCHEMES[3], BLACK);
        // Inverted scheme mirrors it
        assert_eq!(SCHEMES[4], SCHEMES[3]);
        assert_eq!(SCHEMES[7], SCHEMES[0]);
    }
}
