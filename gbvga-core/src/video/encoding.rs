//! Run-length scanline encoding
//!
//! A scanline is a stream of 16-bit tokens packed two per 32-bit word, low
//! half first. Each primitive starts with an opcode token:
//!
//! | Primitive        | Tokens                                   | Pixels |
//! |------------------|------------------------------------------|--------|
//! | `COLOR_RUN`      | `op, color, n - MIN_RUN`                 | `n`    |
//! | `RAW_RUN`        | `op, c0, n - MIN_RUN, c1 .. c(n-1)`      | `n`    |
//! | `RAW_1P`         | `op, color`                              | 1      |
//! | `EOL_ALIGN`      | `op, pad`                                | 0      |
//! | `EOL_SKIP_ALIGN` | `op`                                     | 0      |
//!
//! Opcode values are instruction offsets in the pixel program that consumes
//! the stream, so they are fixed by that program rather than chosen here.
//! Every line ends on a word boundary: [`ScanlineBuffer::end_line`] picks
//! whichever end-of-line form gets it there.

use crate::config::{BORDER_HORZ, GAME_WIDTH, MIN_RUN};

use super::palette::Color;

/// Opcode tokens
pub mod op {
    /// End of line, followed by one padding token
    pub const EOL_ALIGN: u16 = 0;
    /// End of line, no padding
    pub const EOL_SKIP_ALIGN: u16 = 1;
    /// One color repeated
    pub const COLOR_RUN: u16 = 4;
    /// Explicit list of colors
    pub const RAW_RUN: u16 = 9;
    /// A single pixel
    pub const RAW_1P: u16 = 15;
}

/// Capacity of one scanline buffer in 32-bit words
pub const SCANLINE_WORDS: usize = 256;

const SCANLINE_TOKENS: usize = SCANLINE_WORDS * 2;

/// Tokens needed by the longest line the compositor emits: left border run,
/// game raw run, right border run, terminator pixel and end of line
pub const MAX_LINE_TOKENS: usize = 3 + (3 + GAME_WIDTH - 1) + 3 + 2 + 2;

const _: () = assert!(MAX_LINE_TOKENS <= SCANLINE_TOKENS);
const _: () = assert!(BORDER_HORZ - 1 >= MIN_RUN);

/// Errors found while decoding a token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Stream ended inside a primitive or without an end-of-line marker
    Truncated,
    /// Token in opcode position is not a known opcode
    UnknownOpcode(u16),
    /// End-of-line marker left the stream off a word boundary
    Misaligned,
    /// Tokens follow the end-of-line marker
    TrailingData,
}

/// One encoded output line
pub struct ScanlineBuffer {
    words: [u32; SCANLINE_WORDS],
    len: usize,
}

impl ScanlineBuffer {
    pub const fn new() -> Self {
        Self {
            words: [0; SCANLINE_WORDS],
            len: 0,
        }
    }

    /// Discard the current contents
    #[inline(always)]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of tokens written
    pub fn len_tokens(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Words to hand to the pixel machine
    pub fn words(&self) -> &[u32] {
        &self.words[..self.len.div_ceil(2)]
    }

    /// Token at `index`
    pub fn token(&self, index: usize) -> u16 {
        let word = self.words[index / 2];
        if index % 2 == 0 {
            word as u16
        } else {
            (word >> 16) as u16
        }
    }

    /// Iterate over the written tokens
    pub fn tokens(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.len).map(|i| self.token(i))
    }

    /// Append one token
    ///
    /// # Panics
    /// On capacity overflow. Line layouts are sized by `MAX_LINE_TOKENS`.
    #[inline(always)]
    fn push(&mut self, token: u16) {
        let index = self.len;
        if index % 2 == 0 {
            self.words[index / 2] = token as u32;
        } else {
            self.words[index / 2] |= (token as u32) << 16;
        }
        self.len = index + 1;
    }

    /// Overwrite an already written token
    #[inline(always)]
    fn put(&mut self, index: usize, token: u16) {
        let word = &mut self.words[index / 2];
        if index % 2 == 0 {
            *word = (*word & 0xFFFF_0000) | token as u32;
        } else {
            *word = (*word & 0x0000_FFFF) | ((token as u32) << 16);
        }
    }

    /// `pixels` copies of `color`
    #[inline(always)]
    pub fn color_run(&mut self, color: Color, pixels: usize) {
        debug_assert!(pixels >= MIN_RUN);
        self.push(op::COLOR_RUN);
        self.push(color);
        self.push((pixels - MIN_RUN) as u16);
    }

    /// Start a run of `pixels` explicit colors
    ///
    /// The first color lives in a slot inside the run header; fill it with
    /// [`RawRun::set_first`] and append the remaining `pixels - 1` colors
    /// with [`RawRun::push`].
    #[inline(always)]
    pub fn raw_run(&mut self, pixels: usize) -> RawRun<'_> {
        debug_assert!(pixels >= MIN_RUN);
        self.push(op::RAW_RUN);
        let first = self.len;
        self.push(0);
        self.push((pixels - MIN_RUN) as u16);
        RawRun { buf: self, first }
    }

    /// A single pixel
    #[inline(always)]
    pub fn raw_1p(&mut self, color: Color) {
        self.push(op::RAW_1P);
        self.push(color);
    }

    /// Terminate the line on a word boundary
    #[inline(always)]
    pub fn end_line(&mut self) {
        if self.len % 2 == 0 {
            self.push(op::EOL_ALIGN);
            self.push(0);
        } else {
            self.push(op::EOL_SKIP_ALIGN);
        }
    }

    /// Walk the encoded pixels in order, returning how many there were
    pub fn for_each_pixel(&self, mut emit: impl FnMut(Color)) -> Result<usize, DecodeError> {
        fn next(tokens: &mut impl Iterator<Item = u16>) -> Result<u16, DecodeError> {
            tokens.next().ok_or(DecodeError::Truncated)
        }

        let mut tokens = self.tokens();
        let mut pixels = 0usize;
        let mut consumed = 0usize;

        loop {
            let opcode = next(&mut tokens)?;
            consumed += 1;
            match opcode {
                op::COLOR_RUN => {
                    let color = next(&mut tokens)?;
                    let n = next(&mut tokens)? as usize + MIN_RUN;
                    consumed += 2;
                    for _ in 0..n {
                        emit(color);
                    }
                    pixels += n;
                }
                op::RAW_RUN => {
                    let first = next(&mut tokens)?;
                    let n = next(&mut tokens)? as usize + MIN_RUN;
                    consumed += 2;
                    emit(first);
                    for _ in 1..n {
                        emit(next(&mut tokens)?);
                    }
                    consumed += n - 1;
                    pixels += n;
                }
                op::RAW_1P => {
                    emit(next(&mut tokens)?);
                    consumed += 1;
                    pixels += 1;
                }
                op::EOL_ALIGN => {
                    next(&mut tokens)?;
                    consumed += 1;
                    break;
                }
                op::EOL_SKIP_ALIGN => break,
                other => return Err(DecodeError::UnknownOpcode(other)),
            }
        }

        if consumed % 2 != 0 {
            return Err(DecodeError::Misaligned);
        }
        if consumed != self.len {
            return Err(DecodeError::TrailingData);
        }
        Ok(pixels)
    }

    /// Number of pixels the line draws
    pub fn decoded_width(&self) -> Result<usize, DecodeError> {
        self.for_each_pixel(|_| {})
    }
}

impl Default for ScanlineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// An open `RAW_RUN` being filled
pub struct RawRun<'a> {
    buf: &'a mut ScanlineBuffer,
    first: usize,
}

impl RawRun<'_> {
    /// Fill the run's first pixel
    #[inline(always)]
    pub fn set_first(&mut self, color: Color) {
        self.buf.put(self.first, color);
    }

    /// Append the next pixel after the first
    #[inline(always)]
    pub fn push(&mut self, color: Color) {
        self.buf.push(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(buf: &ScanlineBuffer) -> Vec<Color> {
        let mut out = Vec::new();
        buf.for_each_pixel(|c| out.push(c)).unwrap();
        out
    }

    #[test]
    fn test_tokens_pack_low_half_first() {
        let mut buf = ScanlineBuffer::new();
        buf.color_run(0x2A, 5);
        buf.end_line();
        assert_eq!(buf.words()[0], (0x2A << 16) | op::COLOR_RUN as u32);
        assert_eq!(buf.token(2), 2);
        assert_eq!(buf.words().len(), 2);
    }

    #[test]
    fn test_color_run_length_offset() {
        let mut buf = ScanlineBuffer::new();
        buf.color_run(7, MIN_RUN);
        buf.end_line();
        assert_eq!(buf.token(2), 0);
        assert_eq!(pixels(&buf), vec![7; MIN_RUN]);
    }

    #[test]
    fn test_raw_run_first_pixel_slot() {
        let mut buf = ScanlineBuffer::new();
        let mut run = buf.raw_run(4);
        run.push(2);
        run.push(3);
        run.push(4);
        run.set_first(1);
        buf.end_line();
        assert_eq!(buf.token(1), 1);
        assert_eq!(buf.token(2), 1);
        assert_eq!(pixels(&buf), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_end_line_aligns_to_word() {
        // even length: EOL_ALIGN + pad
        let mut buf = ScanlineBuffer::new();
        buf.raw_1p(5);
        buf.end_line();
        assert_eq!(buf.len_tokens(), 4);
        assert_eq!(buf.token(2), op::EOL_ALIGN);

        // odd length: EOL_SKIP_ALIGN alone
        let mut buf = ScanlineBuffer::new();
        buf.color_run(5, 3);
        buf.end_line();
        assert_eq!(buf.len_tokens(), 4);
        assert_eq!(buf.token(3), op::EOL_SKIP_ALIGN);
        assert_eq!(buf.decoded_width(), Ok(3));
    }

    #[test]
    fn test_decode_errors() {
        let mut buf = ScanlineBuffer::new();
        buf.color_run(1, 3);
        assert_eq!(buf.decoded_width(), Err(DecodeError::Truncated));

        let mut buf = ScanlineBuffer::new();
        buf.push(3);
        assert_eq!(buf.decoded_width(), Err(DecodeError::UnknownOpcode(3)));

        let mut buf = ScanlineBuffer::new();
        buf.push(op::EOL_SKIP_ALIGN);
        assert_eq!(buf.decoded_width(), Err(DecodeError::Misaligned));

        let mut buf = ScanlineBuffer::new();
        buf.end_line();
        buf.raw_1p(0);
        assert_eq!(buf.decoded_width(), Err(DecodeError::TrailingData));
    }

    #[test]
    fn test_clear_reuses_buffer() {
        let mut buf = ScanlineBuffer::new();
        buf.color_run(1, 10);
        buf.clear();
        assert!(buf.is_empty());
        buf.raw_1p(9);
        buf.end_line();
        assert_eq!(pixels(&buf), vec![9]);
    }
}
