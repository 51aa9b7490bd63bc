//! Glyph conversion engine.
//!
//! Converts an RGBA pixel buffer into a monospace glyph grid:
//!
//! 1. **Resampling** - Scale the source to the working grid ([`tone`])
//! 2. **Tone adjustment** - Brightness then contrast curve ([`tone`])
//! 3. **Dithering** - Optional Floyd-Steinberg quantization ([`dither`])
//! 4. **Glyph mapping** - Per-pixel palette or 2x4 braille blocks
//! 5. **Raster compositing** - Color surface for colorized output ([`raster`])
//!
//! # Character Sets
//!
//! Formats are selected via [`CharSet`]: eight literal palettes ordered from
//! emptiest to densest glyph, plus `Braille`.

pub mod braille;
mod charset;
mod convert;
mod dimensions;
pub mod dither;
mod mapping;
mod pixel;
pub mod raster;
mod settings;
pub mod tone;

pub use braille::{grid_to_braille, BrailleMapper, BRAILLE_BASE, BRAILLE_FULL};
pub use charset::{
    CharSet, BLOCKS_CHARSET, DENSE_CHARSET, DETAILED_CHARSET, EMOJI_CHARSET, GEOMETRIC_CHARSET,
    KATAKANA_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET,
};
pub use convert::{convert, convert_grid, mapper_for, ConversionResult, ConvertError};
pub use dimensions::{grid_size, GridSize, CHAR_ASPECT_COMPENSATION};
pub use mapping::{palette_index, Glyph, GlyphGrid, GlyphMapper, StandardMapper, SPACE};
pub use pixel::{luminance, PixelBuffer, PixelBufferError, Rgb};
pub use raster::{CellMetrics, Raster};
pub use settings::{
    ConversionConfig, SettingsError, MAX_ANIMATED_RESOLUTION, MAX_RESOLUTION, MIN_RESOLUTION,
};
