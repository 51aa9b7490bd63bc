//! Off-screen color surface for colorized output.
//!
//! Each colored glyph is painted as a solid cell at its grid position, so
//! players can show a color preview and exporters can recover per-glyph
//! colors by sampling cell centers instead of parsing inline markup.

use tiny_skia::{Paint, Pixmap, Rect, Transform};

use super::charset::CharSet;
use super::mapping::GlyphGrid;
use super::pixel::{PixelBuffer, Rgb};

/// Horizontal advance of a monospace glyph at `font_size` (0.6 em).
pub fn monospace_advance(font_size: f32) -> f32 {
    font_size * 3.0 / 5.0
}

/// Font size used for braille output.
pub const BRAILLE_FONT_SIZE: f32 = 10.0;
/// Font size used for literal palettes.
pub const TEXT_FONT_SIZE: f32 = 8.0;
pub const BRAILLE_LINE_HEIGHT: f32 = 1.0;
pub const TEXT_LINE_HEIGHT: f32 = 1.1;

/// Size of one glyph cell on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub font_size: f32,
    pub line_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellMetrics {
    /// Fixed metrics for a format.
    pub fn for_format(format: CharSet) -> Self {
        let (font_size, line_height) = if format.is_braille() {
            (BRAILLE_FONT_SIZE, BRAILLE_LINE_HEIGHT)
        } else {
            (TEXT_FONT_SIZE, TEXT_LINE_HEIGHT)
        };
        Self {
            font_size,
            line_height,
            cell_width: monospace_advance(font_size),
            cell_height: font_size * line_height,
        }
    }

    /// Surface dimensions for a grid of `columns` x `rows` glyphs.
    pub fn surface_size(&self, columns: u32, rows: u32) -> (u32, u32) {
        (
            (columns as f32 * self.cell_width).ceil() as u32,
            (rows as f32 * self.cell_height).ceil() as u32,
        )
    }
}

/// A rendered color surface plus the cell geometry it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    surface: PixelBuffer,
    metrics: CellMetrics,
    columns: u32,
    rows: u32,
}

impl Raster {
    pub fn surface(&self) -> &PixelBuffer {
        &self.surface
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Color at the center of cell `(col, row)`, or `None` for a transparent cell.
    pub fn sample_cell(&self, col: u32, row: u32) -> Option<Rgb> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        let x = ((col as f32 + 0.5) * self.metrics.cell_width) as u32;
        let y = ((row as f32 + 0.5) * self.metrics.cell_height) as u32;
        let x = x.min(self.surface.width() - 1);
        let y = y.min(self.surface.height() - 1);
        let [r, g, b, a] = self.surface.pixel(x, y);
        (a > 0).then_some(Rgb { r, g, b })
    }
}

/// Paint every colored glyph of `grid` onto a fresh transparent surface.
///
/// Returns `None` when the grid is empty and no surface can be allocated.
pub fn composite(grid: &GlyphGrid, format: CharSet) -> Option<Raster> {
    let metrics = CellMetrics::for_format(format);
    let (width, height) = metrics.surface_size(grid.columns(), grid.rows());
    let mut pixmap = Pixmap::new(width, height)?;

    let mut paint = Paint {
        anti_alias: false,
        ..Paint::default()
    };

    for (col, row, color) in grid.colored() {
        let Some(rect) = Rect::from_xywh(
            col as f32 * metrics.cell_width,
            row as f32 * metrics.cell_height,
            metrics.cell_width,
            metrics.cell_height,
        ) else {
            continue;
        };
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    // Every painted pixel is opaque, so premultiplied data equals straight RGBA.
    let surface = PixelBuffer::new(width, height, pixmap.take()).ok()?;
    Some(Raster {
        surface,
        metrics,
        columns: grid.columns(),
        rows: grid.rows(),
    })
}
