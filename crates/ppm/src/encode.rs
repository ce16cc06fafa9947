//! PPM encoding.

use contour_common::Raster;

use crate::PpmFormat;

/// Write the `magic\nwidth height\n255\n` header.
fn write_header(out: &mut Vec<u8>, format: PpmFormat, width: usize, height: usize) {
    out.extend_from_slice(format.magic());
    out.push(b'\n');
    out.extend_from_slice(format!("{width} {height}\n255\n").as_bytes());
}

/// Encode a raster as P6 (raw RGB bytes after the header) or P3 (one
/// `r g b` line per pixel).
pub fn encode_ppm(raster: &Raster, format: PpmFormat) -> Vec<u8> {
    let num_pixels = raster.width() * raster.height();
    match format {
        PpmFormat::Binary => {
            let mut out = Vec::with_capacity(num_pixels * 3 + 32);
            write_header(&mut out, format, raster.width(), raster.height());
            for pixel in raster.pixels() {
                out.extend_from_slice(&pixel.channels());
            }
            out
        }
        PpmFormat::Plain => {
            let mut out = Vec::with_capacity(num_pixels * 12 + 32);
            write_header(&mut out, format, raster.width(), raster.height());
            for pixel in raster.pixels() {
                let line = format!("{} {} {}\n", pixel.red, pixel.green, pixel.blue);
                out.extend_from_slice(line.as_bytes());
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_common::Pixel;

    #[test]
    fn test_binary_layout() {
        let raster = Raster::new(2, 1, vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)]).unwrap();
        let bytes = encode_ppm(&raster, PpmFormat::Binary);

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_plain_layout() {
        let raster = Raster::new(1, 2, vec![Pixel::new(0, 10, 255), Pixel::BLACK]).unwrap();
        let bytes = encode_ppm(&raster, PpmFormat::Plain);
        assert_eq!(bytes, b"P3\n1 2\n255\n0 10 255\n0 0 0\n".to_vec());
    }
}
