//! PPM raster codec.
//!
//! Supports the two 24-bit variants:
//! - **P6 (binary)**: text header followed by raw RGB bytes.
//! - **P3 (plain)**: text header followed by decimal samples.
//!
//! Both variants encode back to exactly the header and layout they are
//! decoded from, so a decode/encode cycle is lossless.

pub mod decode;
pub mod encode;
pub mod error;

use std::fs;
use std::io::Write;
use std::path::Path;

use contour_common::Raster;

pub use decode::{decode_ppm, PpmImage};
pub use encode::encode_ppm;
pub use error::{PpmError, PpmResult};

/// Storage variant of a PPM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmFormat {
    /// `P3`, ASCII decimal samples
    Plain,
    /// `P6`, raw bytes
    #[default]
    Binary,
}

impl PpmFormat {
    pub fn magic(&self) -> &'static [u8; 2] {
        match self {
            PpmFormat::Plain => b"P3",
            PpmFormat::Binary => b"P6",
        }
    }
}

/// Read and decode a PPM file.
pub fn read_ppm(path: impl AsRef<Path>) -> PpmResult<PpmImage> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let image = decode_ppm(&data)?;
    tracing::debug!(
        path = %path.display(),
        width = image.raster.width(),
        height = image.raster.height(),
        "read PPM"
    );
    Ok(image)
}

/// Encode a raster and write it to `path`, replacing any existing file.
pub fn write_ppm(path: impl AsRef<Path>, raster: &Raster, format: PpmFormat) -> PpmResult<()> {
    let path = path.as_ref();
    let bytes = encode_ppm(raster, format);
    let mut file = fs::File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote PPM");
    Ok(())
}
