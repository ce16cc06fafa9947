//! RGB8 raster storage.

use crate::error::{ContourError, ContourResult};

/// A single 24-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Integer average of the three channels.
    #[inline]
    pub fn luminance(&self) -> u8 {
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// A rectangular RGB8 raster in row-major order.
///
/// Pixel `(x, y)` lives at index `y * width + x`. The buffer length always
/// equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Wrap an existing pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> ContourResult<Self> {
        if pixels.len() != width * height {
            return Err(ContourError::InvalidDimensions {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a raster with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Build a raster by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Get the pixel at `(x, y)`, or None when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Set the pixel at `(x, y)`. Panics when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = pixel;
    }

    /// Borrow the raster as a read-only view.
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }
}

/// Borrowed, read-only form of a [`Raster`].
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: usize,
    height: usize,
    pixels: &'a [Pixel],
}

impl<'a> RasterView<'a> {
    /// View a row-major pixel slice as a raster.
    pub fn new(width: usize, height: usize, pixels: &'a [Pixel]) -> ContourResult<Self> {
        if pixels.len() != width * height {
            return Err(ContourError::InvalidDimensions {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &'a [Pixel] {
        self.pixels
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Pixel at `(x, y)` with coordinates clamped to the raster edge.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Pixel {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[cy * self.width + cx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_integer_average() {
        assert_eq!(Pixel::new(255, 255, 255).luminance(), 255);
        assert_eq!(Pixel::new(200, 201, 201).luminance(), 200);
        // 601 / 3 truncates
        assert_eq!(Pixel::new(200, 200, 201).luminance(), 200);
        assert_eq!(Pixel::new(10, 0, 0).luminance(), 3);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Raster::new(3, 3, vec![Pixel::BLACK; 8]).unwrap_err();
        assert!(matches!(
            err,
            ContourError::InvalidDimensions { width: 3, height: 3, actual: 8 }
        ));
    }

    #[test]
    fn test_row_major_indexing() {
        let mut raster = Raster::filled(4, 2, Pixel::BLACK);
        raster.set(3, 1, Pixel::WHITE);
        assert_eq!(raster.pixels()[7], Pixel::WHITE);
        assert_eq!(raster.get(3, 1), Some(Pixel::WHITE));
        assert_eq!(raster.get(4, 1), None);
    }

    #[test]
    fn test_clamped_access() {
        let pixels: Vec<Pixel> = (0..6u8).map(|v| Pixel::new(v, v, v)).collect();
        let raster = Raster::new(3, 2, pixels).unwrap();
        let view = raster.view();

        assert_eq!(view.pixel_clamped(-5, -5), Pixel::new(0, 0, 0));
        assert_eq!(view.pixel_clamped(10, 0), Pixel::new(2, 2, 2));
        assert_eq!(view.pixel_clamped(10, 10), Pixel::new(5, 5, 5));
        assert_eq!(view.pixel_clamped(1, 1), Pixel::new(4, 4, 4));
    }

    #[test]
    fn test_from_fn_row_major() {
        let raster = Raster::from_fn(3, 2, |x, y| Pixel::new(x as u8, y as u8, 0));
        assert_eq!(raster.pixels()[4], Pixel::new(1, 1, 0));
        assert_eq!(raster.get(2, 0), Some(Pixel::new(2, 0, 0)));
    }
}
