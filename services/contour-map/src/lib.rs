//! Render a contour map from one PPM file into another.
//!
//! The binary in `main.rs` only parses arguments and installs logging;
//! everything that touches files lives here so it can be tested.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contour_common::ContourConfig;
use marching::{ContourAtlas, ContourPipeline};
use ppm::PpmFormat;
use tracing::info;

/// One input-to-output rendering request.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub atlas_dir: PathBuf,
    pub workers: NonZeroUsize,
    pub config: ContourConfig,
}

/// What a finished job produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub source_size: (usize, usize),
    pub output_size: (usize, usize),
    pub format: PpmFormat,
}

/// Read the input, render it and write the output in the input's PPM
/// variant. Nothing is written unless rendering succeeds.
pub fn render_file(job: &RenderJob) -> Result<RenderSummary> {
    let started = Instant::now();
    job.config.validate().context("invalid contour configuration")?;

    let image = ppm::read_ppm(&job.input)
        .with_context(|| format!("failed to read input image {}", job.input.display()))?;
    let source_size = (image.raster.width(), image.raster.height());

    let atlas = ContourAtlas::load(&job.atlas_dir, job.config.step)
        .with_context(|| format!("failed to load contour atlas from {}", job.atlas_dir.display()))?;

    let pipeline = ContourPipeline::new(job.config, job.workers.get())?;
    let output = pipeline.run(image.raster, &atlas).context("contour rendering failed")?;
    let output_size = (output.width(), output.height());

    ppm::write_ppm(&job.output, &output, image.format)
        .with_context(|| format!("failed to write output image {}", job.output.display()))?;

    info!(
        input = %job.input.display(),
        output = %job.output.display(),
        source = ?source_size,
        working = ?output_size,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "contour map written"
    );

    Ok(RenderSummary {
        source_size,
        output_size,
        format: image.format,
    })
}
