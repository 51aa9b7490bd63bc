//! Single-frame conversion: resample, tone, dither, map, composite.

use thiserror::Error;

use super::braille::BrailleMapper;
use super::dimensions::{grid_size, MAX_GRID_PIXELS};
use super::dither::dither;
use super::mapping::{GlyphGrid, GlyphMapper, StandardMapper};
use super::pixel::{PixelBuffer, PixelBufferError};
use super::raster::{composite, Raster};
use super::settings::ConversionConfig;
use super::tone::{resample, ToneCurve};

/// Failures while converting one frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("source {source_width}x{source_height} yields an empty {grid_width}x{grid_height} grid")]
    EmptyGrid {
        source_width: u32,
        source_height: u32,
        grid_width: u32,
        grid_height: u32,
    },
    #[error(
        "source {source_width}x{source_height} needs a {grid_width}x{grid_height} grid, \
         above the {max_pixels} pixel limit"
    )]
    GridTooLarge {
        source_width: u32,
        source_height: u32,
        grid_width: u32,
        grid_height: u32,
        max_pixels: u64,
    },
    #[error("could not resample source: {0}")]
    Resample(#[from] PixelBufferError),
    #[error("could not allocate a {width}x{height} raster surface")]
    RasterAllocation { width: u32, height: u32 },
}

/// Output of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Plain glyph grid, every row terminated by `\n`. Always present.
    pub text: String,
    pub columns: u32,
    pub rows: u32,
    /// Color preview, present only for colorized conversions.
    pub raster: Option<Raster>,
}

/// The glyph strategy selected by `config.format`.
pub fn mapper_for(config: &ConversionConfig) -> Box<dyn GlyphMapper + Send + Sync> {
    if config.format.is_braille() {
        Box::new(BrailleMapper::new(
            config.threshold,
            config.invert,
            config.colorized,
        ))
    } else {
        Box::new(StandardMapper::new(
            config.format.chars(),
            config.invert,
            config.colorized,
        ))
    }
}

/// Map `source` to a glyph grid without rendering a raster.
///
/// Colors are extracted from the resampled source before the tone curve
/// runs; every luminance decision uses the tone-adjusted (and, when
/// enabled, dithered) copy.
pub fn convert_grid(source: &PixelBuffer, config: &ConversionConfig) -> Result<GlyphGrid, ConvertError> {
    let size = grid_size(
        config.format,
        config.resolution,
        source.width(),
        source.height(),
    );
    if size.is_empty() {
        return Err(ConvertError::EmptyGrid {
            source_width: source.width(),
            source_height: source.height(),
            grid_width: size.width,
            grid_height: size.height,
        });
    }

    if size.is_oversized() {
        return Err(ConvertError::GridTooLarge {
            source_width: source.width(),
            source_height: source.height(),
            grid_width: size.width,
            grid_height: size.height,
            max_pixels: MAX_GRID_PIXELS,
        });
    }

    let original = resample(source, size)?;
    let mut working = original.clone();
    ToneCurve::new(config.contrast, config.brightness).apply_to(&mut working);
    if config.dithering {
        dither(&mut working, config.format.dither_levels());
    }

    let mapper = mapper_for(config);
    Ok(GlyphGrid::map(mapper.as_ref(), &working, &original))
}

/// Convert one pixel buffer into glyph text, plus a color raster when
/// `config.colorized` is set.
///
/// This is a pure function of its inputs: identical buffers and configs
/// always give identical results.
pub fn convert(source: &PixelBuffer, config: &ConversionConfig) -> Result<ConversionResult, ConvertError> {
    let grid = convert_grid(source, config)?;

    let raster = if config.colorized {
        let raster = composite(&grid, config.format).ok_or(ConvertError::RasterAllocation {
            width: grid.columns(),
            height: grid.rows(),
        })?;
        Some(raster)
    } else {
        None
    };

    Ok(ConversionResult {
        text: grid.to_text(),
        columns: grid.columns(),
        rows: grid.rows(),
        raster,
    })
}
