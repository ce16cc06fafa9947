//! Bicubic resampling of RGB rasters.

use std::ops::Range;

use contour_common::{Pixel, Raster, RasterView};

/// Map destination index `i` of `n` onto `[0, 1]`.
#[inline]
fn normalized(i: usize, n: usize) -> f32 {
    if n > 1 {
        i as f32 / (n - 1) as f32
    } else {
        0.0
    }
}

/// 1D cubic interpolation using Catmull-Rom spline.
#[inline]
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    // Catmull-Rom coefficients
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

/// Sample the source at normalized coordinates `(u, v)` in `[0, 1]`.
///
/// Uses the 4x4 neighbourhood around the sample point, clamped to the
/// raster edge, and clamps each channel to `[0, 255]`.
pub fn sample_bicubic(source: RasterView<'_>, u: f32, v: f32) -> Pixel {
    let x = u * source.width() as f32 - 0.5;
    let y = v * source.height() as f32 - 0.5;

    let x0 = x.floor();
    let y0 = y.floor();
    let xf = x - x0;
    let yf = y - y0;
    let xi = x0 as i64;
    let yi = y0 as i64;

    // Sample 4x4 grid of points
    let mut neighbours = [[Pixel::BLACK; 4]; 4];
    for (j, row) in neighbours.iter_mut().enumerate() {
        for (i, pixel) in row.iter_mut().enumerate() {
            *pixel = source.pixel_clamped(xi + i as i64 - 1, yi + j as i64 - 1);
        }
    }

    let mut out = [0u8; 3];
    for (channel, value) in out.iter_mut().enumerate() {
        // Cubic interpolation along x for each row
        let mut row_values = [0.0f32; 4];
        for (j, row) in neighbours.iter().enumerate() {
            row_values[j] = cubic_1d(
                row[0].channels()[channel] as f32,
                row[1].channels()[channel] as f32,
                row[2].channels()[channel] as f32,
                row[3].channels()[channel] as f32,
                xf,
            );
        }

        // Cubic interpolation along y
        let sample = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        *value = sample.clamp(0.0, 255.0) as u8;
    }

    Pixel::from(out)
}

/// Resample destination rows `rows` of a `dst_width x dst_height` raster.
///
/// `out` holds exactly those rows, `rows.len() * dst_width` pixels.
pub fn resample_rows(
    source: RasterView<'_>,
    dst_width: usize,
    dst_height: usize,
    rows: Range<usize>,
    out: &mut [Pixel],
) {
    debug_assert_eq!(out.len(), rows.len() * dst_width);

    for (dy, row) in rows.zip(out.chunks_exact_mut(dst_width.max(1))) {
        let v = normalized(dy, dst_height);
        for (dx, pixel) in row.iter_mut().enumerate() {
            *pixel = sample_bicubic(source, normalized(dx, dst_width), v);
        }
    }
}

/// Resample a whole raster to `dst_width x dst_height` on the calling thread.
pub fn resample(source: &Raster, dst_width: usize, dst_height: usize) -> Raster {
    let mut output = Raster::filled(dst_width, dst_height, Pixel::BLACK);
    resample_rows(
        source.view(),
        dst_width,
        dst_height,
        0..dst_height,
        output.pixels_mut(),
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-4, "{actual} != {expected}");
    }

    #[test]
    fn test_cubic_1d_endpoints() {
        assert_close(cubic_1d(1.0, 2.0, 3.0, 4.0, 0.0), 2.0);
        assert_close(cubic_1d(1.0, 2.0, 3.0, 4.0, 1.0), 3.0);
        // Linear data stays linear under Catmull-Rom
        assert_close(cubic_1d(1.0, 2.0, 3.0, 4.0, 0.5), 2.5);
    }

    #[test]
    fn test_constant_raster_stays_constant() {
        let source = Raster::filled(5, 3, Pixel::new(12, 130, 250));
        for &(u, v) in &[(0.0, 0.0), (0.37, 0.81), (1.0, 1.0), (0.5, 0.0)] {
            assert_eq!(sample_bicubic(source.view(), u, v), Pixel::new(12, 130, 250));
        }
    }

    #[test]
    fn test_overshoot_is_clamped() {
        // A sharp edge makes Catmull-Rom overshoot past 255 and below 0
        let mut pixels = Vec::new();
        for x in 0..8 {
            let v = if x < 4 { 0 } else { 255 };
            pixels.push(Pixel::new(v, v, v));
        }
        let source = Raster::new(8, 1, pixels).unwrap();
        let out = resample(&source, 29, 1);
        assert_eq!(out.pixels()[0], Pixel::BLACK);
        assert_eq!(out.pixels()[28], Pixel::WHITE);
        // x = 9 * 8 / 28 - 0.5 sits just right of source column 2 (undershoot)
        assert_eq!(out.pixels()[9], Pixel::BLACK);
        // x = 16 * 8 / 28 - 0.5 sits just right of source column 4 (overshoot)
        assert_eq!(out.pixels()[16], Pixel::WHITE);
    }

    #[test]
    fn test_resample_rows_matches_whole() {
        let pixels = (0..64u8).map(|v| Pixel::new(v * 3, 255 - v, v)).collect();
        let source = Raster::new(8, 8, pixels).unwrap();
        let whole = resample(&source, 5, 7);

        let mut band = vec![Pixel::BLACK; 3 * 5];
        resample_rows(source.view(), 5, 7, 2..5, &mut band);
        assert_eq!(band.as_slice(), &whole.pixels()[2 * 5..5 * 5]);
    }

    #[test]
    fn test_single_pixel_destination() {
        let source = Raster::filled(3, 3, Pixel::new(40, 50, 60));
        let out = resample(&source, 1, 1);
        assert_eq!(out.pixels(), &[Pixel::new(40, 50, 60)]);
    }
}
