//! Resampling to the working grid and the contrast/brightness curve.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::dimensions::GridSize;
use super::pixel::{PixelBuffer, PixelBufferError};

/// Midpoint contrast is scaled around.
const MIDPOINT: f32 = 127.5;

/// Resample `source` to exactly `size` with a bilinear (triangle) filter.
///
/// A source that already has the target size is copied unchanged. An empty
/// target size is rejected before any resampling happens.
pub fn resample(source: &PixelBuffer, size: GridSize) -> Result<PixelBuffer, PixelBufferError> {
    if size.is_empty() {
        return Err(PixelBufferError::ZeroDimension {
            width: size.width,
            height: size.height,
        });
    }
    if source.width() == size.width && source.height() == size.height {
        return Ok(source.clone());
    }
    let image = RgbaImage::from(source);
    imageops::resize(&image, size.width, size.height, FilterType::Triangle).try_into()
}

/// Precomputed brightness-then-contrast curve over all 256 channel values.
#[derive(Debug, Clone)]
pub struct ToneCurve {
    lut: [u8; 256],
}

impl ToneCurve {
    /// Build the curve for percentage `contrast` and `brightness` (100 = identity).
    pub fn new(contrast: u16, brightness: u16) -> Self {
        let contrast = contrast as f32 / 100.0;
        let brightness = brightness as f32 / 100.0;
        let mut lut = [0u8; 256];
        for (value, slot) in lut.iter_mut().enumerate() {
            let lit = value as f32 * brightness;
            let contrasted = (lit - MIDPOINT) * contrast + MIDPOINT;
            *slot = contrasted.clamp(0.0, 255.0).round() as u8;
        }
        Self { lut }
    }

    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| i == v as usize)
    }

    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Adjust the RGB channels of every pixel. Alpha is left as is.
    pub fn apply_to(&self, buffer: &mut PixelBuffer) {
        if self.is_identity() {
            return;
        }
        for px in buffer.pixels_mut() {
            px[0] = self.apply(px[0]);
            px[1] = self.apply(px[1]);
            px[2] = self.apply(px[2]);
        }
    }
}

/// Resample `source` to `size` and apply the tone curve to the result.
pub fn preprocess(
    source: &PixelBuffer,
    size: GridSize,
    contrast: u16,
    brightness: u16,
) -> Result<PixelBuffer, PixelBufferError> {
    let mut resampled = resample(source, size)?;
    ToneCurve::new(contrast, brightness).apply_to(&mut resampled);
    Ok(resampled)
}
