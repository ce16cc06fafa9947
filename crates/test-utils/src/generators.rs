//! Synthetic raster generators.
//!
//! Every generator is deterministic so tests can compare outputs across
//! worker counts without storing fixtures.

use contour_common::{Pixel, Raster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn gray(v: u8) -> Pixel {
    Pixel::new(v, v, v)
}

/// A raster filled with one colour.
pub fn uniform_raster(width: usize, height: usize, fill: Pixel) -> Raster {
    Raster::filled(width, height, fill)
}

/// Horizontal gray ramp from black at `x = 0` to white at the last column.
pub fn gradient_raster(width: usize, height: usize) -> Raster {
    let span = width.saturating_sub(1).max(1);
    Raster::from_fn(width, height, |x, _| gray((x * 255 / span) as u8))
}

/// Black and white squares of edge `cell`, black at the origin.
pub fn checker_raster(width: usize, height: usize, cell: usize) -> Raster {
    let cell = cell.max(1);
    Raster::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Pixel::BLACK
        } else {
            Pixel::WHITE
        }
    })
}

/// Pseudo-random colours from a fixed seed.
pub fn noise_raster(width: usize, height: usize, seed: u64) -> Raster {
    let mut rng = StdRng::seed_from_u64(seed);
    Raster::from_fn(width, height, |_, _| Pixel::new(rng.gen(), rng.gen(), rng.gen()))
}

/// A filled disc of `fill` centred in a `background` raster.
pub fn disc_raster(width: usize, height: usize, radius: f32, fill: Pixel, background: Pixel) -> Raster {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    Raster::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        if dx * dx + dy * dy <= radius * radius {
            fill
        } else {
            background
        }
    })
}
