//! Procedural frame sources for the demo binary and tests.
//!
//! Each pattern is a function of pixel position and an animation phase in
//! `[0, 1)`, so an N-frame sequence loops seamlessly.

use std::f32::consts::TAU;
use std::time::Duration;

use crate::ascii::{PixelBuffer, PixelBufferError};
use crate::pipeline::{Frame, FrameSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Diagonal color ramp scrolling to the right.
    Gradient,
    /// Concentric rings expanding from the center.
    Rings,
    /// Two-tone checkerboard sliding diagonally.
    Checker,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Gradient, Pattern::Rings, Pattern::Checker];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Gradient => "gradient",
            Pattern::Rings => "rings",
            Pattern::Checker => "checker",
        }
    }

    /// Render one opaque frame at `phase` (taken modulo 1).
    pub fn render(&self, width: u32, height: u32, phase: f32) -> Result<PixelBuffer, PixelBufferError> {
        let mut buffer = PixelBuffer::filled(width, height, [0, 0, 0, 255])?;
        let phase = phase.rem_euclid(1.0);
        let w = width as f32;
        let h = height as f32;

        for (i, px) in buffer.pixels_mut().enumerate() {
            let x = (i as u32 % width) as f32;
            let y = (i as u32 / width) as f32;
            let [r, g, b] = match self {
                Pattern::Gradient => gradient(x / w, y / h, phase),
                Pattern::Rings => rings(x - w / 2.0, y - h / 2.0, w.max(h), phase),
                Pattern::Checker => checker(x, y, (w.max(h) / 8.0).max(1.0), phase),
            };
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
        Ok(buffer)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn gradient(u: f32, v: f32, phase: f32) -> [u8; 3] {
    let t = ((u + v) / 2.0 + phase).rem_euclid(1.0);
    [channel(t), channel(1.0 - v), channel(1.0 - t)]
}

fn rings(dx: f32, dy: f32, extent: f32, phase: f32) -> [u8; 3] {
    let d = (dx * dx + dy * dy).sqrt() / extent;
    let wave = 0.5 + 0.5 * (d * 6.0 * TAU - phase * TAU).cos();
    [channel(wave), channel(wave * 0.8), channel(0.3 + wave * 0.7)]
}

fn checker(x: f32, y: f32, cell: f32, phase: f32) -> [u8; 3] {
    let shift = phase * cell * 2.0;
    let cx = ((x + shift) / cell).floor() as i64;
    let cy = ((y + shift) / cell).floor() as i64;
    if (cx + cy).rem_euclid(2) == 0 {
        [235, 220, 200]
    } else {
        [30, 40, 70]
    }
}

/// Build a sequence of `frames` frames of `pattern`.
///
/// One frame yields a still image; more yield an animation whose frames use
/// `delay` (normalized like decoded animation delays).
pub fn sequence(
    pattern: Pattern,
    width: u32,
    height: u32,
    frames: usize,
    delay: Option<Duration>,
) -> Result<FrameSequence, PixelBufferError> {
    if frames <= 1 {
        return Ok(FrameSequence::still(pattern.render(width, height, 0.0)?));
    }

    let frames = (0..frames)
        .map(|i| {
            let phase = i as f32 / frames as f32;
            pattern
                .render(width, height, phase)
                .map(|buffer| Frame::animated(buffer, delay))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FrameSequence::new(frames))
}
