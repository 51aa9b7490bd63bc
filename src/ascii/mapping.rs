//! Glyph mapping: the shared mapper contract and the per-pixel palette strategy.

use super::pixel::{PixelBuffer, Rgb};

/// The glyph every literal palette starts with.
pub const SPACE: char = ' ';

/// One output cell: a character plus the color it should be drawn in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Rgb>,
}

impl Glyph {
    pub const fn plain(ch: char) -> Self {
        Self { ch, color: None }
    }
}

/// Converts one cell of the working buffer into a glyph.
///
/// `working` is the tone-adjusted (and possibly dithered) buffer used for
/// every luminance decision; `original` has the same dimensions but carries
/// the untouched colors used for colorized output.
pub trait GlyphMapper {
    /// Pixels covered by one glyph, as (columns, rows).
    fn cell_size(&self) -> (u32, u32);

    /// Map the cell whose top-left pixel is `(col * cell_w, row * cell_h)`.
    fn map_cell(&self, working: &PixelBuffer, original: &PixelBuffer, col: u32, row: u32) -> Glyph;
}

/// Palette index for a luminance value: floor(luminance / 255 * (len - 1)).
#[inline]
pub fn palette_index(luminance: f32, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let max = palette_len - 1;
    let idx = (luminance.clamp(0.0, 255.0) / 255.0 * max as f32).floor() as usize;
    idx.min(max)
}

/// One glyph per pixel, picked from a density-ordered palette.
#[derive(Debug, Clone)]
pub struct StandardMapper {
    palette: &'static [char],
    invert: bool,
    colorized: bool,
}

impl StandardMapper {
    pub fn new(palette: &'static [char], invert: bool, colorized: bool) -> Self {
        Self {
            palette,
            invert,
            colorized,
        }
    }

    pub fn palette(&self) -> &'static [char] {
        self.palette
    }
}

impl GlyphMapper for StandardMapper {
    fn cell_size(&self) -> (u32, u32) {
        (1, 1)
    }

    fn map_cell(&self, working: &PixelBuffer, original: &PixelBuffer, col: u32, row: u32) -> Glyph {
        if self.palette.is_empty() || working.alpha(col, row) == 0 {
            return Glyph::plain(SPACE);
        }

        let mut lum = working.luminance(col, row);
        if self.invert {
            lum = 255.0 - lum;
        }
        let ch = self.palette[palette_index(lum, self.palette.len())];

        let color = (self.colorized && ch != SPACE).then(|| original.rgb(col, row));
        Glyph { ch, color }
    }
}

/// A mapped frame: glyphs in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    columns: u32,
    rows: u32,
    glyphs: Vec<Glyph>,
}

impl GlyphGrid {
    /// Run `mapper` over every cell of `working`.
    ///
    /// Cells that would extend past the buffer are dropped, so the grid covers
    /// `width / cell_w` by `height / cell_h` glyphs.
    pub fn map<M: GlyphMapper + ?Sized>(mapper: &M, working: &PixelBuffer, original: &PixelBuffer) -> Self {
        let (cell_w, cell_h) = mapper.cell_size();
        let columns = working.width() / cell_w;
        let rows = working.height() / cell_h;

        let mut glyphs = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for col in 0..columns {
                glyphs.push(mapper.map_cell(working, original, col, row));
            }
        }

        Self {
            columns,
            rows,
            glyphs,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn get(&self, col: u32, row: u32) -> Option<&Glyph> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.glyphs.get((row * self.columns + col) as usize)
    }

    /// Glyphs that carry a color.
    pub fn colored(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let columns = self.columns.max(1);
        self.glyphs.iter().enumerate().filter_map(move |(i, g)| {
            g.color
                .map(|c| (i as u32 % columns, i as u32 / columns, c))
        })
    }

    /// Plain text, every row terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.glyphs.len() * 3 + self.rows as usize);
        for row in self.glyphs.chunks(self.columns.max(1) as usize) {
            text.extend(row.iter().map(|g| g.ch));
            text.push('\n');
        }
        text
    }
}
