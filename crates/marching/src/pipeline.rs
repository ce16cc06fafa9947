//! Parallel coordinator for the three-phase contour pipeline.
//!
//! A fixed pool of worker threads is created once per run. Every worker
//! runs the same routine over its own [`WorkPartition`]:
//!
//! 1. resample its band of destination rows (skipped when the source
//!    already fits the working resolution), then wait at the barrier
//! 2. sample its grid rows and its share of the boundary row, then wait
//! 3. stamp its grid rows into the working raster
//!
//! The working raster and the sample grid are allocated before any thread
//! starts and are shared through [`SharedSlice`]. Write ranges are derived
//! from the partition and checked to tile their buffers before the pool
//! starts, so no lock is taken inside a phase.

use std::ops::Range;
use std::thread;
use std::time::Instant;

use contour_common::{ContourConfig, ContourError, ContourResult, Pixel, Raster, RasterView};
use tracing::{debug, info};

use crate::atlas::ContourAtlas;
use crate::barrier::PhaseBarrier;
use crate::march::march_rows;
use crate::partition::{tiles, WorkPartition};
use crate::resample::resample_rows;
use crate::sample::{sample_boundary_row, sample_rows, GridView, SampleGrid};
use crate::shared::SharedSlice;

/// Index ranges one worker reads and writes across the three phases.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkerPlan {
    /// Destination rows resampled in phase 1
    resample_rows: Range<usize>,
    /// Pixel indices written in phase 1
    resample_span: Range<usize>,
    /// Grid rows sampled in phase 2 and stamped in phase 3
    grid_rows: Range<usize>,
    /// Point indices of `grid_rows`
    grid_span: Range<usize>,
    /// Boundary-row points sampled in phase 2
    boundary_cols: Range<usize>,
    /// Point indices of `boundary_cols`
    boundary_span: Range<usize>,
    /// Pixel indices written in phase 3
    march_span: Range<usize>,
    writes_corner: bool,
}

/// Compute every worker's plan and check that each phase's writes are
/// disjoint and complete.
fn plan_workers(workers: usize, width: usize, height: usize, step: usize, grid: &SampleGrid) -> Vec<WorkerPlan> {
    let plans: Vec<WorkerPlan> = (0..workers)
        .map(|id| {
            let part = WorkPartition::new(id, workers);
            let resample_rows = part.range(height);
            let grid_rows = part.range(grid.cells_y());
            let boundary_cols = part.range(grid.cells_x());
            WorkerPlan {
                resample_span: resample_rows.start * width..resample_rows.end * width,
                resample_rows,
                grid_span: grid.row_span(grid_rows.clone()),
                march_span: grid_rows.start * step * width..grid_rows.end * step * width,
                grid_rows,
                boundary_span: grid.boundary_span(boundary_cols.clone()),
                boundary_cols,
                writes_corner: id == 0,
            }
        })
        .collect();

    let resample: Vec<_> = plans.iter().map(|p| p.resample_span.clone()).collect();
    assert!(tiles(&resample, width * height), "resample writes must tile the raster");

    let corner = grid.corner_index();
    let mut points: Vec<_> = plans.iter().map(|p| p.grid_span.clone()).collect();
    points.extend(plans.iter().map(|p| p.boundary_span.clone()));
    points.push(corner..corner + 1);
    assert!(tiles(&points, grid.points().len()), "grid writes must tile the grid");

    let march: Vec<_> = plans.iter().map(|p| p.march_span.clone()).collect();
    assert!(
        tiles(&march, grid.cells_y() * step * width),
        "stamp writes must tile the stamped rows"
    );

    plans
}

/// State every worker of a run borrows.
struct RunContext<'a> {
    config: ContourConfig,
    atlas: &'a ContourAtlas,
    /// Present only when the working raster is a resampled copy
    source: Option<RasterView<'a>>,
    width: usize,
    height: usize,
    cells_x: usize,
    cells_y: usize,
    corner: usize,
    pixels: SharedSlice<'a, Pixel>,
    points: SharedSlice<'a, u8>,
    barrier: PhaseBarrier,
}

fn run_worker(id: usize, plan: &WorkerPlan, ctx: &RunContext<'_>) -> ContourResult<()> {
    let guard = ctx.barrier.abort_guard();

    // Phase 1: resample
    if let Some(source) = ctx.source {
        let started = Instant::now();
        // SAFETY: resample spans are disjoint across workers, and no worker
        // reads the working raster until after the next barrier.
        let out = unsafe { ctx.pixels.slice_mut(plan.resample_span.clone()) };
        resample_rows(source, ctx.width, ctx.height, plan.resample_rows.clone(), out);
        debug!(
            worker = id,
            rows = ?plan.resample_rows,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "resampled rows"
        );
    }
    ctx.barrier.wait()?;

    // Phase 2: sample grid
    {
        let started = Instant::now();
        // SAFETY: all phase 1 writes completed at the barrier; phase 2 only
        // reads pixels. Grid writes use disjoint spans and nobody reads the
        // grid until after the next barrier.
        let pixels = unsafe { ctx.pixels.as_slice() };
        let raster = RasterView::new(ctx.width, ctx.height, pixels)?;

        let rows = unsafe { ctx.points.slice_mut(plan.grid_span.clone()) };
        sample_rows(raster, &ctx.config, plan.grid_rows.clone(), rows);

        let boundary = unsafe { ctx.points.slice_mut(plan.boundary_span.clone()) };
        sample_boundary_row(raster, &ctx.config, plan.boundary_cols.clone(), boundary);

        if plan.writes_corner {
            let corner = unsafe { ctx.points.slice_mut(ctx.corner..ctx.corner + 1) };
            corner[0] = 0;
        }
        debug!(
            worker = id,
            rows = ?plan.grid_rows,
            boundary = ?plan.boundary_cols,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "sampled grid"
        );
    }
    ctx.barrier.wait()?;
    // No waits remain, so an early exit can no longer strand another worker
    guard.disarm();

    // Phase 3: march
    let started = Instant::now();
    // SAFETY: the grid is complete and read-only from here on. Nobody reads
    // pixels in phase 3 and stamp spans are disjoint across workers.
    let points = unsafe { ctx.points.as_slice() };
    let grid = GridView::new(ctx.cells_x, ctx.cells_y, points);
    let band = unsafe { ctx.pixels.slice_mut(plan.march_span.clone()) };
    march_rows(grid, ctx.atlas, plan.grid_rows.clone(), ctx.width, band);
    debug!(
        worker = id,
        rows = ?plan.grid_rows,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "stamped contours"
    );

    Ok(())
}

/// Pick the error to report when a run fails.
///
/// A spawn failure or panic is the root cause; the barrier aborts it
/// triggers in other workers are consequences.
fn first_failure(spawn_error: Option<ContourError>, results: Vec<ContourResult<()>>) -> ContourResult<()> {
    if let Some(err) = spawn_error {
        return Err(err);
    }

    let mut aborted = None;
    for result in results {
        match result {
            Ok(()) => {}
            Err(ContourError::BarrierAborted) => aborted = Some(ContourError::BarrierAborted),
            Err(err) => return Err(err),
        }
    }
    aborted.map_or(Ok(()), Err)
}

/// Runs the contour pipeline with a fixed number of worker threads.
#[derive(Debug, Clone)]
pub struct ContourPipeline {
    config: ContourConfig,
    workers: usize,
}

impl ContourPipeline {
    pub fn new(config: ContourConfig, workers: usize) -> ContourResult<Self> {
        config.validate()?;
        if workers == 0 {
            return Err(ContourError::invalid_config("worker count must be at least 1"));
        }
        Ok(Self { config, workers })
    }

    /// Render the contour map of `source`.
    ///
    /// When the source fits the working resolution it becomes the working
    /// raster and is stamped in place, so the returned raster reuses the
    /// source's pixel buffer. Otherwise the result is a newly allocated
    /// resampled raster.
    pub fn run(&self, source: Raster, atlas: &ContourAtlas) -> ContourResult<Raster> {
        let (src_width, src_height) = (source.width(), source.height());
        if src_width == 0 || src_height == 0 {
            return Err(ContourError::EmptyRaster {
                width: src_width,
                height: src_height,
            });
        }
        if atlas.step() != self.config.step {
            return Err(ContourError::atlas(format!(
                "atlas stamps are {0}x{0}, pipeline step is {1}",
                atlas.step(),
                self.config.step
            )));
        }

        let started = Instant::now();
        let resampling = self.config.needs_resample(src_width, src_height);
        let (width, height) = self.config.working_size(src_width, src_height);

        let (source, mut working) = if resampling {
            (Some(source), Raster::filled(width, height, Pixel::BLACK))
        } else {
            (None, source)
        };
        let mut grid = SampleGrid::new(width, height, self.config.step);

        info!(
            source = ?(src_width, src_height),
            working = ?(width, height),
            cells = ?(grid.cells_x(), grid.cells_y()),
            workers = self.workers,
            resampling,
            "starting contour run"
        );

        let plans = plan_workers(self.workers, width, height, self.config.step, &grid);
        let ctx = RunContext {
            config: self.config,
            atlas,
            source: source.as_ref().map(Raster::view),
            width,
            height,
            cells_x: grid.cells_x(),
            cells_y: grid.cells_y(),
            corner: grid.corner_index(),
            pixels: SharedSlice::new(working.pixels_mut()),
            points: SharedSlice::new(grid.points_mut()),
            barrier: PhaseBarrier::new(self.workers),
        };

        let (spawn_error, results) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(plans.len());
            let mut spawn_error = None;

            for (id, plan) in plans.iter().enumerate() {
                let ctx = &ctx;
                let spawned = thread::Builder::new()
                    .name(format!("contour-worker-{id}"))
                    .spawn_scoped(scope, move || run_worker(id, plan, ctx));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        ctx.barrier.abort();
                        spawn_error = Some(ContourError::ThreadSpawn {
                            id,
                            message: e.to_string(),
                        });
                        break;
                    }
                }
            }

            let results: Vec<ContourResult<()>> = handles
                .into_iter()
                .enumerate()
                .map(|(id, handle)| handle.join().unwrap_or(Err(ContourError::WorkerPanicked(id))))
                .collect();
            (spawn_error, results)
        });
        drop(ctx);

        first_failure(spawn_error, results)?;

        info!(
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "contour run complete"
        );
        Ok(working)
    }
}
