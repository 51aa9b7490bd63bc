//! Braille character rendering for high-resolution glyph art.
//!
//! Each braille character represents a 2x4 dot matrix, providing 8 subpixels
//! per glyph cell.

use super::dimensions::{BRAILLE_CELL_HEIGHT, BRAILLE_CELL_WIDTH};
use super::mapping::{Glyph, GlyphMapper};
use super::pixel::{PixelBuffer, Rgb};

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Fully-set braille pattern (U+28FF).
pub const BRAILLE_FULL: char = '\u{28FF}';

/// Pixels with alpha below this never raise a dot.
pub const DOT_ALPHA_CUTOFF: u8 = 128;

/// Dot bit for each sub-position, as `(dx, dy, bit)`.
///
/// ```text
/// [0,0]=1   [1,0]=8
/// [0,1]=2   [1,1]=16
/// [0,2]=4   [1,2]=32
/// [0,3]=64  [1,3]=128
/// ```
pub const DOT_BITS: [(u32, u32, u8); 8] = [
    (0, 0, 0x01),
    (0, 1, 0x02),
    (0, 2, 0x04),
    (1, 0, 0x08),
    (1, 1, 0x10),
    (1, 2, 0x20),
    (0, 3, 0x40),
    (1, 3, 0x80),
];

/// Convert a 2x4 boolean grid to a braille character.
///
/// # Arguments
/// * `grid` - A 2x4 boolean array where grid[x][y] indicates if dot at (x,y) is on
///
/// # Returns
/// The corresponding braille character (U+2800 to U+28FF)
pub fn grid_to_braille(grid: [[bool; 4]; 2]) -> char {
    let code = DOT_BITS
        .iter()
        .filter(|(dx, dy, _)| grid[*dx as usize][*dy as usize])
        .fold(0u8, |code, (_, _, bit)| code | bit);
    pattern_char(code)
}

/// The braille glyph for an 8-bit dot pattern.
pub fn pattern_char(code: u8) -> char {
    char::from_u32(BRAILLE_BASE as u32 + code as u32).unwrap_or(BRAILLE_BASE)
}

/// One glyph per 2x4 block, dots raised by a luminance threshold.
#[derive(Debug, Clone)]
pub struct BrailleMapper {
    threshold: u8,
    invert: bool,
    colorized: bool,
}

impl BrailleMapper {
    pub fn new(threshold: u8, invert: bool, colorized: bool) -> Self {
        Self {
            threshold,
            invert,
            colorized,
        }
    }

    /// A dot is raised when the pixel is mostly opaque and on the "ink" side
    /// of the threshold: darker than it normally, at least as bright when inverted.
    #[inline]
    fn is_active(&self, buffer: &PixelBuffer, x: u32, y: u32) -> bool {
        if buffer.alpha(x, y) < DOT_ALPHA_CUTOFF {
            return false;
        }
        let lum = buffer.luminance(x, y);
        let threshold = self.threshold as f32;
        if self.invert {
            lum >= threshold
        } else {
            lum < threshold
        }
    }
}

impl GlyphMapper for BrailleMapper {
    fn cell_size(&self) -> (u32, u32) {
        (BRAILLE_CELL_WIDTH, BRAILLE_CELL_HEIGHT)
    }

    fn map_cell(&self, working: &PixelBuffer, original: &PixelBuffer, col: u32, row: u32) -> Glyph {
        let x0 = col * BRAILLE_CELL_WIDTH;
        let y0 = row * BRAILLE_CELL_HEIGHT;

        let mut code = 0u8;
        let mut sum = [0u32; 3];
        let mut active = 0u32;

        for &(dx, dy, bit) in DOT_BITS.iter() {
            let (x, y) = (x0 + dx, y0 + dy);
            if x >= working.width() || y >= working.height() {
                continue;
            }
            if !self.is_active(working, x, y) {
                continue;
            }
            code |= bit;
            let rgb = original.rgb(x, y);
            sum[0] += rgb.r as u32;
            sum[1] += rgb.g as u32;
            sum[2] += rgb.b as u32;
            active += 1;
        }

        let color = (self.colorized && active > 0).then(|| {
            let mean = |s: u32| ((s as f32 / active as f32).round()) as u8;
            Rgb::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
        });

        Glyph {
            ch: pattern_char(code),
            color,
        }
    }
}
