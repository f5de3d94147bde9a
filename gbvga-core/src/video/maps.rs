//! Output-to-source coordinate maps
//!
//! Built once from [`PIXEL_SCALE`]; the compositor looks up which source row
//! an output game row samples instead of dividing per line.

use crate::config::{GAME_HEIGHT, GAME_WIDTH, PIXEL_SCALE};

/// Lookup tables from game-area output coordinates to source coordinates
pub struct CoordinateMaps {
    x: [u8; GAME_WIDTH],
    y: [u8; GAME_HEIGHT],
}

impl CoordinateMaps {
    /// Build both maps for the fixed scale factor
    pub const fn new() -> Self {
        let mut x = [0u8; GAME_WIDTH];
        let mut y = [0u8; GAME_HEIGHT];

        let mut i = 0;
        while i < GAME_WIDTH {
            x[i] = (i / PIXEL_SCALE) as u8;
            i += 1;
        }
        let mut i = 0;
        while i < GAME_HEIGHT {
            y[i] = (i / PIXEL_SCALE) as u8;
            i += 1;
        }

        Self { x, y }
    }

    /// Source column for game-area output column `x`
    #[inline(always)]
    pub fn source_x(&self, x: usize) -> usize {
        self.x[x] as usize
    }

    /// Source row for game-area output row `y`
    #[inline(always)]
    pub fn source_y(&self, y: usize) -> usize {
        self.y[y] as usize
    }
}

impl Default for CoordinateMaps {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SOURCE_HEIGHT, SOURCE_WIDTH};

    #[test]
    fn test_maps_follow_scale() {
        let maps = CoordinateMaps::new();
        for i in 0..GAME_WIDTH {
            assert_eq!(maps.source_x(i), i / PIXEL_SCALE);
        }
        for i in 0..GAME_HEIGHT {
            assert_eq!(maps.source_y(i), i / PIXEL_SCALE);
        }
        assert_eq!(maps.source_x(GAME_WIDTH - 1), SOURCE_WIDTH - 1);
        assert_eq!(maps.source_y(GAME_HEIGHT - 1), SOURCE_HEIGHT - 1);
    }
}
