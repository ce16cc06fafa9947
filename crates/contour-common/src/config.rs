//! Configuration for the contour pipeline.

use crate::error::{ContourError, ContourResult};
use serde::{Deserialize, Serialize};

/// Default sampling step (grid cell edge in pixels).
pub const DEFAULT_STEP: usize = 8;

/// Default luminance threshold. Samples at or below it are inside the contour.
pub const DEFAULT_SIGMA: u8 = 200;

/// Default working-resolution ceiling in each dimension.
pub const DEFAULT_RESCALE: usize = 2048;

/// Number of marching-squares configurations, one stamp each.
pub const CONTOUR_CONFIG_COUNT: usize = 16;

/// Fixed parameters of a contour run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Grid step in pixels. Atlas stamps are `step x step`.
    pub step: usize,

    /// Luminance threshold for the sample grid.
    pub sigma: u8,

    /// Maximum working width; wider sources are resampled to exactly this.
    pub rescale_width: usize,

    /// Maximum working height; taller sources are resampled to exactly this.
    pub rescale_height: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            sigma: DEFAULT_SIGMA,
            rescale_width: DEFAULT_RESCALE,
            rescale_height: DEFAULT_RESCALE,
        }
    }
}

impl ContourConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CONTOUR_STEP") {
            if let Ok(step) = val.parse() {
                config.step = step;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_SIGMA") {
            if let Ok(sigma) = val.parse() {
                config.sigma = sigma;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_RESCALE_X") {
            if let Ok(width) = val.parse() {
                config.rescale_width = width;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_RESCALE_Y") {
            if let Ok(height) = val.parse() {
                config.rescale_height = height;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ContourResult<()> {
        if self.step == 0 {
            return Err(ContourError::invalid_config("step must be at least 1"));
        }
        if self.rescale_width == 0 || self.rescale_height == 0 {
            return Err(ContourError::invalid_config(format!(
                "rescale ceiling must be non-zero, got {}x{}",
                self.rescale_width, self.rescale_height
            )));
        }
        Ok(())
    }

    /// Whether a `width x height` source exceeds the working-resolution ceiling.
    pub fn needs_resample(&self, width: usize, height: usize) -> bool {
        width > self.rescale_width || height > self.rescale_height
    }

    /// Dimensions of the working raster for a `width x height` source.
    pub fn working_size(&self, width: usize, height: usize) -> (usize, usize) {
        if self.needs_resample(width, height) {
            (self.rescale_width, self.rescale_height)
        } else {
            (width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContourConfig::default();
        assert_eq!(config.step, 8);
        assert_eq!(config.sigma, 200);
        assert_eq!(config.rescale_width, 2048);
        assert_eq!(config.rescale_height, 2048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = ContourConfig {
            step: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ContourError::InvalidConfig(_))));
    }

    #[test]
    fn test_working_size() {
        let config = ContourConfig::default();
        assert_eq!(config.working_size(2048, 2048), (2048, 2048));
        assert_eq!(config.working_size(100, 30), (100, 30));
        assert_eq!(config.working_size(2049, 10), (2048, 2048));
        assert_eq!(config.working_size(10, 4000), (2048, 2048));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ContourConfig = serde_json::from_str(r#"{"step": 4, "sigma": 90}"#).unwrap();
        assert_eq!(config.step, 4);
        assert_eq!(config.sigma, 90);
        assert_eq!(config.rescale_width, DEFAULT_RESCALE);
    }
}
