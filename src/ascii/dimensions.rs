//! Dimension calculation for aspect-ratio-correct glyph grids.

use super::charset::CharSet;

/// Glyph cells are roughly twice as tall as wide, so standard grids keep half
/// as many rows as the source aspect ratio would suggest.
pub const CHAR_ASPECT_COMPENSATION: f64 = 0.5;

/// Pixels covered by one braille glyph horizontally.
pub const BRAILLE_CELL_WIDTH: u32 = 2;

/// Pixels covered by one braille glyph vertically.
pub const BRAILLE_CELL_HEIGHT: u32 = 4;

/// Pixel dimensions the source is resampled to before mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel count, computed without overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the grid exceeds [`MAX_GRID_PIXELS`].
    pub fn is_oversized(&self) -> bool {
        self.area() > MAX_GRID_PIXELS
    }

    /// Glyph columns and rows produced from a grid of this size.
    ///
    /// Standard formats emit one glyph per pixel; braille emits one per 2x4 block.
    pub fn glyph_dimensions(&self, format: CharSet) -> (u32, u32) {
        if format.is_braille() {
            (
                self.width / BRAILLE_CELL_WIDTH,
                self.height / BRAILLE_CELL_HEIGHT,
            )
        } else {
            (self.width, self.height)
        }
    }
}

/// Largest working grid, in pixels, a single frame may be resampled to.
///
/// A still at the top resolution on a 1:10 portrait source stays well below
/// this; only pathological aspect ratios reach it.
pub const MAX_GRID_PIXELS: u64 = 1 << 24;

/// Calculate the working grid for a source image.
///
/// * Standard: width = `resolution`, height = round(width / aspect * 0.5).
/// * Braille: width = `resolution * 2`, height = the next multiple of 4 that is
///   at least width / aspect.
///
/// Returns an empty size for degenerate sources; callers treat that as a
/// processing failure. Heights that do not fit in `u32` saturate, so the
/// result is always checked against [`MAX_GRID_PIXELS`] before use.
pub fn grid_size(format: CharSet, resolution: u32, img_width: u32, img_height: u32) -> GridSize {
    if img_width == 0 || img_height == 0 || resolution == 0 {
        return GridSize {
            width: 0,
            height: 0,
        };
    }

    // width / (img_width / img_height), computed without the intermediate ratio
    // so exact aspect ratios stay exact.
    let scaled = |width: u32| width as f64 * img_height as f64 / img_width as f64;

    // Float-to-int casts saturate, so oversized heights clamp to u32::MAX.
    if format.is_braille() {
        let width = resolution.saturating_mul(BRAILLE_CELL_WIDTH);
        let blocks = (scaled(width) / BRAILLE_CELL_HEIGHT as f64).ceil();
        GridSize {
            width,
            height: (blocks * BRAILLE_CELL_HEIGHT as f64) as u32,
        }
    } else {
        let width = resolution;
        let height = (scaled(width) * CHAR_ASPECT_COMPENSATION).round() as u32;
        GridSize { width, height }
    }
}
