//! Source and output geometry
//!
//! The console's LCD is sampled at its native resolution and upscaled by an
//! integer factor, then framed by solid borders to fill the output mode.

/// Source LCD width in pixels
pub const SOURCE_WIDTH: usize = 160;

/// Source LCD height in pixels
pub const SOURCE_HEIGHT: usize = 144;

/// Number of source pixels per frame
pub const SOURCE_PIXEL_COUNT: usize = SOURCE_WIDTH * SOURCE_HEIGHT;

/// Integer upscale factor, applied on both axes
pub const PIXEL_SCALE: usize = 3;

/// Width of the upscaled game area (480)
pub const GAME_WIDTH: usize = SOURCE_WIDTH * PIXEL_SCALE;

/// Height of the upscaled game area (432)
pub const GAME_HEIGHT: usize = SOURCE_HEIGHT * PIXEL_SCALE;

/// Border width left and right of the game area
pub const BORDER_HORZ: usize = 80;

/// Border height above and below the game area
pub const BORDER_VERT: usize = 24;

/// Output line width in pixels
pub const OUTPUT_WIDTH: usize = 2 * BORDER_HORZ + GAME_WIDTH;

/// Output frame height in lines
pub const OUTPUT_HEIGHT: usize = 2 * BORDER_VERT + GAME_HEIGHT;

/// Overlay width in source pixels
pub const OVERLAY_WIDTH: usize = 120;

/// Overlay height in source pixels
pub const OVERLAY_HEIGHT: usize = 64;

/// Left edge of the centered overlay rectangle, in source columns
pub const OVERLAY_X: usize = (SOURCE_WIDTH - OVERLAY_WIDTH) / 2;

/// Top edge of the centered overlay rectangle, in source rows
pub const OVERLAY_Y: usize = (SOURCE_HEIGHT - OVERLAY_HEIGHT) / 2;

/// Shortest run the scanline encoding can express; run lengths are stored
/// as `pixels - MIN_RUN`
pub const MIN_RUN: usize = 3;

const _: () = assert!(OVERLAY_WIDTH <= SOURCE_WIDTH && OVERLAY_HEIGHT <= SOURCE_HEIGHT);
const _: () = assert!(OUTPUT_WIDTH == super::mode::VGA_640X480_60.h_active);
const _: () = assert!(OUTPUT_HEIGHT == super::mode::VGA_640X480_60.v_active);
// Accent rows are picked by absolute line number; the game area must start
// on a scale boundary for them to land on the first row of each triple.
const _: () = assert!(BORDER_VERT % PIXEL_SCALE == 0);
const _: () = assert!(BORDER_HORZ > MIN_RUN && GAME_WIDTH >= MIN_RUN);
// Coordinate maps store source coordinates as bytes
const _: () = assert!(SOURCE_WIDTH <= 256 && SOURCE_HEIGHT <= 256);
