//! PPM decoding.
//!
//! Header and payload parsing is done by the `image` crate's PNM decoder.
//! This module restricts it to 24-bit pixmaps with a max value of 255 and
//! records which of the two variants the data was stored in.

use contour_common::{Pixel, Raster};
use image::codecs::pnm::PnmDecoder;
use image::{ColorType, ImageDecoder};

use crate::error::{PpmError, PpmResult};
use crate::PpmFormat;

/// Only 8-bit channels are supported
const MAX_COLOR: u32 = 255;

/// A decoded image together with the variant it was stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpmImage {
    pub format: PpmFormat,
    pub raster: Raster,
}

/// Storage variant from the two magic bytes.
fn detect_format(data: &[u8]) -> PpmResult<PpmFormat> {
    let magic = &data[..data.len().min(2)];
    match magic {
        b"P3" => Ok(PpmFormat::Plain),
        b"P6" => Ok(PpmFormat::Binary),
        other => Err(PpmError::InvalidMagic(String::from_utf8_lossy(other).into_owned())),
    }
}

/// Decode a P3 or P6 image from memory.
pub fn decode_ppm(data: &[u8]) -> PpmResult<PpmImage> {
    let format = detect_format(data)?;

    let (_, header) = PnmDecoder::new(data)?.into_inner();
    if header.maximal_sample() != MAX_COLOR {
        return Err(PpmError::UnsupportedMaxValue(header.maximal_sample()));
    }

    let decoder = PnmDecoder::new(data)?;
    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(PpmError::invalid_header(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if decoder.color_type() != ColorType::Rgb8 {
        return Err(PpmError::invalid_header(format!(
            "expected 8-bit RGB samples, got {:?}",
            decoder.color_type()
        )));
    }

    let len = usize::try_from(decoder.total_bytes())
        .map_err(|_| PpmError::invalid_header(format!("image {width}x{height} is too large")))?;
    let mut samples = vec![0u8; len];
    decoder.read_image(&mut samples)?;

    let pixels: Vec<Pixel> = samples
        .chunks_exact(3)
        .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]))
        .collect();
    let raster = Raster::new(width as usize, height as usize, pixels)
        .map_err(|e| PpmError::invalid_header(e.to_string()))?;

    tracing::trace!(width, height, ?format, "decoded PPM");

    Ok(PpmImage { format, raster })
}
