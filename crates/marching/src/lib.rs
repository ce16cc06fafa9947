//! Marching-squares contour maps for RGB rasters.
//!
//! The pipeline runs in three lock-step phases across a fixed pool of
//! worker threads:
//! - Resample the source to the working resolution (bicubic)
//! - Threshold regional luminance into a binary sample grid
//! - Classify every grid cell and stamp the matching contour tile
//!
//! The single-threaded building blocks are public so each phase can be
//! used and tested on its own.

pub mod atlas;
pub mod barrier;
pub mod march;
pub mod partition;
pub mod pipeline;
pub mod resample;
pub mod sample;
pub mod shared;

pub use atlas::ContourAtlas;
pub use barrier::PhaseBarrier;
pub use march::{cell_code, march, march_rows};
pub use partition::WorkPartition;
pub use pipeline::ContourPipeline;
pub use resample::{resample, resample_rows, sample_bicubic};
pub use sample::{sample_boundary_row, sample_grid, sample_rows, GridView, SampleGrid};
