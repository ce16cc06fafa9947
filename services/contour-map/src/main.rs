//! Contour map renderer.
//!
//! Reads a PPM image, draws marching-squares contours over it using the
//! stamp atlas and writes the result as PPM.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use contour_common::ContourConfig;
use contour_map::{render_file, RenderJob};
use marching::atlas::DEFAULT_ATLAS_DIR;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "contour-map")]
#[command(about = "Draw marching-squares contours over a PPM image")]
struct Args {
    /// Input PPM image (P3 or P6)
    in_file: PathBuf,

    /// Output PPM image, written in the input's format
    out_file: PathBuf,

    /// Number of worker threads
    threads: NonZeroUsize,

    /// Directory holding the contour stamps 0.ppm through 15.ppm
    #[arg(long, env = "CONTOUR_ATLAS_DIR", default_value = DEFAULT_ATLAS_DIR)]
    atlas_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = ContourConfig::from_env();
    info!(
        step = config.step,
        sigma = config.sigma,
        rescale = ?(config.rescale_width, config.rescale_height),
        threads = args.threads.get(),
        "Starting contour map renderer"
    );

    let job = RenderJob {
        input: args.in_file,
        output: args.out_file,
        atlas_dir: args.atlas_dir,
        workers: args.threads,
        config,
    };
    render_file(&job)?;
    Ok(())
}
