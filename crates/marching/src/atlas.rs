//! The 16 contour stamps, one per marching-squares configuration.
//!
//! Stamps live on disk as `{dir}/{code}.ppm` for codes `0..=15`. Every stamp
//! is exactly `step x step` pixels. The atlas is read-only once loaded and
//! is shared by all workers without synchronization.

use std::path::Path;

use contour_common::config::CONTOUR_CONFIG_COUNT;
use contour_common::{ContourError, ContourResult, Raster};

/// Conventional atlas directory, relative to the working directory.
pub const DEFAULT_ATLAS_DIR: &str = "./contours";

#[derive(Debug, Clone)]
pub struct ContourAtlas {
    step: usize,
    stamps: Vec<Raster>,
}

impl ContourAtlas {
    /// Build an atlas from stamps in code order.
    pub fn from_stamps(stamps: Vec<Raster>, step: usize) -> ContourResult<Self> {
        if stamps.len() != CONTOUR_CONFIG_COUNT {
            return Err(ContourError::atlas(format!(
                "expected {CONTOUR_CONFIG_COUNT} stamps, got {}",
                stamps.len()
            )));
        }

        for (code, stamp) in stamps.iter().enumerate() {
            if stamp.width() != step || stamp.height() != step {
                return Err(ContourError::atlas(format!(
                    "stamp {code} is {}x{}, expected {step}x{step}",
                    stamp.width(),
                    stamp.height()
                )));
            }
        }

        Ok(Self { step, stamps })
    }

    /// Load `{dir}/0.ppm` through `{dir}/15.ppm`.
    pub fn load(dir: impl AsRef<Path>, step: usize) -> ContourResult<Self> {
        let dir = dir.as_ref();
        let mut stamps = Vec::with_capacity(CONTOUR_CONFIG_COUNT);

        for code in 0..CONTOUR_CONFIG_COUNT {
            let path = dir.join(format!("{code}.ppm"));
            let image = ppm::read_ppm(&path).map_err(|e| {
                ContourError::atlas(format!("failed to load {}: {e}", path.display()))
            })?;
            stamps.push(image.raster);
        }

        tracing::debug!(dir = %dir.display(), step, "loaded contour atlas");
        Self::from_stamps(stamps, step)
    }

    /// Stamp edge length in pixels.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Stamp for configuration `code`, which must be below 16.
    #[inline]
    pub fn stamp(&self, code: u8) -> &Raster {
        &self.stamps[code as usize]
    }
}
