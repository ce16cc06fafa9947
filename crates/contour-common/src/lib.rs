//! Common types and utilities shared across the contour-map workspace.

pub mod config;
pub mod error;
pub mod raster;

pub use config::ContourConfig;
pub use error::{ContourError, ContourResult};
pub use raster::{Pixel, Raster, RasterView};
