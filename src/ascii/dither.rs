//! Floyd-Steinberg error diffusion over luminance.

use super::pixel::{luminance, PixelBuffer};

/// Quantize a row-major luminance plane to `levels` evenly spaced values in place.
pub fn diffuse(plane: &mut [f32], width: usize, height: usize, levels: usize) {
    if levels < 2 || width == 0 || height == 0 {
        return;
    }
    let factor = (levels - 1) as f32 / 255.0;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = plane[idx];
            let quantized = (old.clamp(0.0, 255.0) * factor).round() / factor;
            plane[idx] = quantized;
            spread_error(plane, width, height, x, y, old - quantized);
        }
    }
}

/// Push `error` from `(x, y)` to its unvisited neighbours.
///
/// Neighbours outside the plane are skipped; error never wraps across rows:
///
/// ```text
///        [*]  7/16
///  3/16  5/16 1/16
/// ```
pub fn spread_error(
    plane: &mut [f32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    error: f32,
) {
    let idx = y * width + x;
    if x + 1 < width {
        plane[idx + 1] += error * 7.0 / 16.0;
    }
    if y + 1 < height {
        if x > 0 {
            plane[idx + width - 1] += error * 3.0 / 16.0;
        }
        plane[idx + width] += error * 5.0 / 16.0;
        if x + 1 < width {
            plane[idx + width + 1] += error / 16.0;
        }
    }
}

/// Luminance of every pixel, row-major.
pub fn luminance_plane(buffer: &PixelBuffer) -> Vec<f32> {
    buffer
        .pixels()
        .map(|p| luminance(p[0], p[1], p[2]))
        .collect()
}

/// Dither `buffer` to `levels` gray levels, writing the quantized luminance
/// into all three color channels. Alpha is preserved.
///
/// Only the working copy passed in is modified; callers keep a separate
/// buffer for color extraction.
pub fn dither(buffer: &mut PixelBuffer, levels: usize) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut plane = luminance_plane(buffer);
    diffuse(&mut plane, width, height, levels);

    for (px, value) in buffer.pixels_mut().zip(plane) {
        let gray = value.clamp(0.0, 255.0).round() as u8;
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _y in 0..height {
            for x in 0..width {
                let v = (x * 255 / (width - 1)) as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_two_levels_is_binary() {
        let mut buf = gradient(32, 8);
        dither(&mut buf, 2);
        for px in buf.pixels() {
            assert!(px[0] == 0 || px[0] == 255, "got {}", px[0]);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_preserves_alpha() {
        let mut buf = PixelBuffer::filled(3, 3, [90, 90, 90, 42]).unwrap();
        dither(&mut buf, 4);
        assert!(buf.pixels().all(|p| p[3] == 42));
    }

    #[test]
    fn test_levels_are_evenly_spaced() {
        let mut plane = vec![0.0, 60.0, 130.0, 255.0];
        diffuse(&mut plane, 4, 1, 3);
        // levels: 0, 127.5, 255
        for v in &plane {
            let on_level = [0.0f32, 127.5, 255.0].iter().any(|l| (v - l).abs() < 1e-3);
            assert!(on_level, "{} is not a quantization level", v);
        }
    }

    #[test]
    fn test_kernel_weights_from_center() {
        let mut plane = vec![0.0f32; 9];
        spread_error(&mut plane, 3, 3, 1, 1, 16.0);
        #[rustfmt::skip]
        let expected = vec![
            0.0, 0.0, 0.0,
            0.0, 0.0, 7.0,
            3.0, 5.0, 1.0,
        ];
        assert_eq!(plane, expected);
    }

    #[test]
    fn test_kernel_skips_out_of_bounds_neighbours() {
        // Left column: nothing below-left.
        let mut plane = vec![0.0f32; 9];
        spread_error(&mut plane, 3, 3, 0, 0, 16.0);
        assert_eq!(plane, vec![0.0, 7.0, 0.0, 5.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        // Bottom row: only the right neighbour.
        let mut plane = vec![0.0f32; 9];
        spread_error(&mut plane, 3, 3, 1, 2, 16.0);
        assert_eq!(plane, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 7.0]);

        // Bottom-right corner: nowhere to go.
        let mut plane = vec![0.0f32; 9];
        spread_error(&mut plane, 3, 3, 2, 2, 16.0);
        assert!(plane.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_end_does_not_wrap() {
        let mut plane = vec![0.0f32; 9];
        spread_error(&mut plane, 3, 3, 2, 0, 16.0);
        // (0, 1) is the next index but must stay untouched.
        assert_eq!(plane, vec![0.0, 0.0, 0.0, 0.0, 3.0, 5.0, 0.0, 0.0, 0.0]);

        let mut plane = vec![0.0f32; 3];
        spread_error(&mut plane, 1, 3, 0, 0, 16.0);
        assert_eq!(plane, vec![0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_diffuse_row_end_error_stays_in_its_row() {
        // (1, 0) quantizes 200 -> 255, error -55. Below-left gets 3/16 of it,
        // leaving (0, 1) at 129.69, which rounds up. Any wrapped share would
        // pull it below 127.5 and round it to black.
        let mut plane = vec![0.0, 200.0, 140.0, 0.0];
        diffuse(&mut plane, 2, 2, 2);
        let on = |v: f32| (v - 255.0).abs() < 1e-3;
        let off = |v: f32| v.abs() < 1e-3;
        assert!(off(plane[0]) && on(plane[1]), "{plane:?}");
        assert!(on(plane[2]), "{plane:?}");
        assert!(off(plane[3]), "{plane:?}");
    }

    #[test]
    fn test_diffuse_single_row_carries_seven_sixteenths() {
        // 100 -> 0 leaves 143.75 next door -> 255, whose -111.25 error
        // leaves 51.33 for the last pixel -> 0.
        let mut plane = vec![100.0, 100.0, 100.0];
        diffuse(&mut plane, 3, 1, 2);
        let expected = [0.0f32, 255.0, 0.0];
        assert!(
            plane.iter().zip(expected).all(|(v, e)| (v - e).abs() < 1e-3),
            "{plane:?}"
        );
    }

    #[test]
    fn test_mean_stays_within_one_step() {
        for levels in [2usize, 5, 10] {
            let buf = gradient(64, 48);
            let before = buf.mean_luminance();
            let mut dithered = buf.clone();
            dither(&mut dithered, levels);
            let after = dithered.mean_luminance();
            let step = 255.0 / (levels - 1) as f32;
            assert!(
                (before - after).abs() <= step,
                "levels={} before={} after={}",
                levels,
                before,
                after
            );
        }
    }

    #[test]
    fn test_degenerate_levels_are_noop() {
        let mut plane = vec![12.5, 200.0];
        diffuse(&mut plane, 2, 1, 1);
        assert_eq!(plane, vec![12.5, 200.0]);
    }
}
