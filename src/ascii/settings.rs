//! Per-request conversion settings and their range limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::charset::CharSet;

pub const MIN_RESOLUTION: u32 = 20;
/// Upper resolution bound for a single still image.
pub const MAX_RESOLUTION: u32 = 400;
/// Upper resolution bound when converting an animated sequence.
pub const MAX_ANIMATED_RESOLUTION: u32 = 200;
pub const MIN_THRESHOLD: u8 = 1;
pub const MAX_THRESHOLD: u8 = 254;
/// Lower bound for contrast and brightness percentages.
pub const MIN_TONE_PERCENT: u16 = 50;
/// Upper bound for contrast and brightness percentages.
pub const MAX_TONE_PERCENT: u16 = 200;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("resolution must be between {min} and {max}, got {value}")]
    Resolution { value: u32, min: u32, max: u32 },
    #[error("threshold must be between 1 and 254, got {0}")]
    Threshold(u8),
    #[error("contrast must be between 50% and 200%, got {0}%")]
    Contrast(u16),
    #[error("brightness must be between 50% and 200%, got {0}%")]
    Brightness(u16),
}

/// Everything a single conversion depends on besides the pixels.
///
/// Two configs compare equal only when every field matches, which makes the
/// struct usable directly as part of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub format: CharSet,
    /// Grid width driver: glyph columns for literal palettes, half the dot
    /// columns for braille.
    pub resolution: u32,
    pub invert: bool,
    /// Braille dot threshold on luminance.
    pub threshold: u8,
    /// Percent, 100 = identity.
    pub contrast: u16,
    /// Percent, 100 = identity.
    pub brightness: u16,
    pub dithering: bool,
    pub colorized: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            format: CharSet::Braille,
            resolution: 120,
            invert: false,
            threshold: 128,
            contrast: 100,
            brightness: 100,
            dithering: true,
            colorized: false,
        }
    }
}

impl ConversionConfig {
    /// Check every field against the still-image limits.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.validate_with_max_resolution(MAX_RESOLUTION)
    }

    /// Check every field, using the tighter resolution cap for animations.
    pub fn validate_for_frames(&self, frame_count: usize) -> Result<(), SettingsError> {
        let max = if frame_count > 1 {
            MAX_ANIMATED_RESOLUTION
        } else {
            MAX_RESOLUTION
        };
        self.validate_with_max_resolution(max)
    }

    fn validate_with_max_resolution(&self, max: u32) -> Result<(), SettingsError> {
        if !(MIN_RESOLUTION..=max).contains(&self.resolution) {
            return Err(SettingsError::Resolution {
                value: self.resolution,
                min: MIN_RESOLUTION,
                max,
            });
        }
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold) {
            return Err(SettingsError::Threshold(self.threshold));
        }
        if !(MIN_TONE_PERCENT..=MAX_TONE_PERCENT).contains(&self.contrast) {
            return Err(SettingsError::Contrast(self.contrast));
        }
        if !(MIN_TONE_PERCENT..=MAX_TONE_PERCENT).contains(&self.brightness) {
            return Err(SettingsError::Brightness(self.brightness));
        }
        Ok(())
    }
}
