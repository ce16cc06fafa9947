//! Contour stamp fixtures.
//!
//! Real atlases draw line segments; tests instead fill every stamp with a
//! colour that encodes its configuration code, so each output block tells
//! which code was stamped there.

use contour_common::{Pixel, Raster};

/// Colour of the solid stamp for configuration `code`.
///
/// Distinct for every code and never equal to [`SENTINEL`].
pub fn stamp_color(code: u8) -> Pixel {
    Pixel::new(code * 16, 255 - code * 16, 100 + code)
}

/// Decode a colour produced by [`stamp_color`].
pub fn code_of(pixel: Pixel) -> Option<u8> {
    (0..16u8).find(|&code| stamp_color(code) == pixel)
}

/// Fill colour for "not yet written" in disjointness tests.
pub const SENTINEL: Pixel = Pixel::new(1, 2, 3);

/// Sixteen solid `step x step` stamps in code order.
pub fn coded_stamps(step: usize) -> Vec<Raster> {
    (0..16u8)
        .map(|code| Raster::filled(step, step, stamp_color(code)))
        .collect()
}

/// Sixteen stamps whose pixels also encode their offset inside the stamp.
///
/// Pixel `(sx, sy)` of stamp `code` is `(code, sx, sy)`, which exposes
/// stamps copied with the wrong orientation or offset.
pub fn positional_stamps(step: usize) -> Vec<Raster> {
    (0..16u8)
        .map(|code| Raster::from_fn(step, step, |sx, sy| Pixel::new(code, sx as u8, sy as u8)))
        .collect()
}
