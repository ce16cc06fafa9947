//! Tests that per-worker phase work covers every output exactly once.
//!
//! Each worker's share is run in isolation against a fresh buffer, so the
//! set of indices it writes can be observed directly.

use contour_common::{ContourConfig, Pixel, Raster};
use marching::{
    march_rows, resample, resample_rows, sample_boundary_row, sample_grid, sample_rows,
    ContourAtlas, SampleGrid, WorkPartition,
};
use test_utils::{assert_approx_eq, code_of, coded_stamps, gradient_raster, noise_raster, SENTINEL};

fn config(step: usize) -> ContourConfig {
    ContourConfig {
        step,
        sigma: 127,
        ..Default::default()
    }
}

// ============================================================================
// Phase 3: stamping
// ============================================================================

#[test]
fn test_stamp_blocks_written_exactly_once() {
    let step = 4;
    let (width, height) = (43, 26);
    let atlas = ContourAtlas::from_stamps(coded_stamps(step), step).unwrap();
    let grid = sample_grid(&noise_raster(width, height, 5), &config(step));

    for workers in [1, 2, 3, 5, 8] {
        let mut writes = vec![0usize; grid.cells_x() * grid.cells_y()];

        for id in 0..workers {
            let rows = WorkPartition::new(id, workers).range(grid.cells_y());
            let mut raster = Raster::filled(width, height, SENTINEL);
            let band = rows.start * step * width..rows.end * step * width;
            march_rows(grid.view(), &atlas, rows.clone(), width, &mut raster.pixels_mut()[band]);

            for gy in 0..grid.cells_y() {
                for gx in 0..grid.cells_x() {
                    let pixel = raster.get(gx * step, gy * step).unwrap();
                    if pixel != SENTINEL {
                        assert!(rows.contains(&gy), "worker {id} wrote outside its rows");
                        assert!(code_of(pixel).is_some());
                        writes[gy * grid.cells_x() + gx] += 1;
                    }
                }
            }

            // Pixels outside full cells are never touched
            for y in 0..height {
                assert_eq!(raster.get(width - 1, y), Some(SENTINEL));
            }
        }

        assert!(writes.iter().all(|&n| n == 1), "workers = {workers}");
    }
}

// ============================================================================
// Phase 2: grid sampling
// ============================================================================

#[test]
fn test_partitioned_grid_matches_sequential() {
    let step = 3;
    let raster = noise_raster(31, 20, 17);
    let expected = sample_grid(&raster, &config(step));

    for workers in [1, 2, 4, 7, 12] {
        let mut grid = SampleGrid::new(raster.width(), raster.height(), step);
        let (cells_x, cells_y) = (grid.cells_x(), grid.cells_y());

        for id in 0..workers {
            let part = WorkPartition::new(id, workers);
            let rows = part.range(cells_y);
            let cols = part.range(cells_x);
            let rows_span = grid.row_span(rows.clone());
            let cols_span = grid.boundary_span(cols.clone());

            sample_rows(raster.view(), &config(step), rows, &mut grid.points_mut()[rows_span]);
            sample_boundary_row(raster.view(), &config(step), cols, &mut grid.points_mut()[cols_span]);
        }

        assert_eq!(grid, expected, "workers = {workers}");
    }
}

// ============================================================================
// Phase 1: resampling
// ============================================================================

#[test]
fn test_partitioned_resample_matches_sequential() {
    let source = noise_raster(50, 35, 23);
    let (width, height) = (24, 19);
    let expected = resample(&source, width, height);

    for workers in [1, 3, 6, 25] {
        let mut output = Raster::filled(width, height, SENTINEL);
        for range in WorkPartition::all(workers, height) {
            let span = range.start * width..range.end * width;
            resample_rows(source.view(), width, height, range, &mut output.pixels_mut()[span]);
        }
        assert_eq!(output, expected, "workers = {workers}");
    }
}

#[test]
fn test_single_pixel_source_fills_destination() {
    let source = Raster::filled(1, 1, Pixel::new(77, 5, 230));
    let output = resample(&source, 9, 4);
    assert!(output.pixels().iter().all(|&p| p == Pixel::new(77, 5, 230)));
}

#[test]
fn test_resample_follows_linear_ramp() {
    let source = gradient_raster(50, 4);
    let output = resample(&source, 24, 4);

    // Interior samples see a near-linear neighbourhood, which Catmull-Rom
    // reproduces up to the source's integer truncation
    for dx in 3..21 {
        let x = dx as f64 / 23.0 * 50.0 - 0.5;
        let expected = x * 255.0 / 49.0;
        assert_approx_eq!(output.get(dx, 1).unwrap().red, expected, 3.0);
    }
}
