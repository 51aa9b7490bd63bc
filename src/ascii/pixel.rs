//! RGBA pixel buffers and ITU-R BT.601 luminance.

use image::RgbaImage;
use thiserror::Error;

/// Bytes per pixel in a [`PixelBuffer`] (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Errors raised when constructing a [`PixelBuffer`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("pixel buffer dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("expected {expected} bytes for a {width}x{height} RGBA buffer, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// An RGB color extracted for a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A row-major RGBA image, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        if width == 0 || height == 0 {
            return Err(PixelBufferError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer filled with one RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, PixelBufferError> {
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let o = self.offset(x, y);
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }

    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        Rgb { r, g, b }
    }

    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y) + 3]
    }

    /// Luminance of the pixel at `(x, y)`.
    #[inline]
    pub fn luminance(&self, x: u32, y: u32) -> f32 {
        let [r, g, b, _] = self.pixel(x, y);
        luminance(r, g, b)
    }

    /// Iterate the RGBA quadruplets mutably, in row-major order.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Mean luminance over every pixel.
    pub fn mean_luminance(&self) -> f32 {
        let count = (self.width as usize * self.height as usize) as f32;
        let sum: f32 = self.pixels().map(|p| luminance(p[0], p[1], p[2])).sum();
        sum / count
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = PixelBufferError;

    fn try_from(image: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

impl From<&PixelBuffer> for RgbaImage {
    fn from(buffer: &PixelBuffer) -> Self {
        // Length was checked at construction, so from_raw cannot fail here.
        RgbaImage::from_raw(buffer.width, buffer.height, buffer.data.clone())
            .unwrap_or_else(|| RgbaImage::new(buffer.width, buffer.height))
    }
}

/// Y = 0.299*R + 0.587*G + 0.114*B, unrounded.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114
}
