//! Cell classification and stamp compositing.
//!
//! Each cell's configuration code packs its four corner samples as
//! top-left = 8, top-right = 4, bottom-right = 2, bottom-left = 1. The
//! atlas stamps are drawn for exactly this corner order.

use std::ops::Range;

use contour_common::{Pixel, Raster};

use crate::atlas::ContourAtlas;
use crate::sample::{GridView, SampleGrid};

/// Configuration code (0-15) of cell `(gx, gy)`.
#[inline]
pub fn cell_code(grid: GridView<'_>, gx: usize, gy: usize) -> u8 {
    8 * grid.get(gx, gy) + 4 * grid.get(gx + 1, gy) + 2 * grid.get(gx + 1, gy + 1) + grid.get(gx, gy + 1)
}

/// Stamp every cell of grid rows `rows`.
///
/// `out` is the band of pixel rows `rows.start * step..rows.end * step` of a
/// raster `width` pixels wide. Columns right of `cells_x * step` are left
/// untouched.
pub fn march_rows(
    grid: GridView<'_>,
    atlas: &ContourAtlas,
    rows: Range<usize>,
    width: usize,
    out: &mut [Pixel],
) {
    let step = atlas.step();
    let band_len = step * width;
    debug_assert_eq!(out.len(), rows.len() * band_len);

    for (gy, band) in rows.zip(out.chunks_exact_mut(band_len.max(1))) {
        for gx in 0..grid.cells_x() {
            let stamp = atlas.stamp(cell_code(grid, gx, gy)).pixels();
            let x = gx * step;
            for (sy, stamp_row) in stamp.chunks_exact(step).enumerate() {
                let start = sy * width + x;
                band[start..start + step].copy_from_slice(stamp_row);
            }
        }
    }
}

/// Stamp the whole raster on the calling thread.
pub fn march(raster: &mut Raster, grid: &SampleGrid, atlas: &ContourAtlas) {
    let step = atlas.step();
    let width = raster.width();
    let rows = 0..grid.cells_y();
    let band = &mut raster.pixels_mut()[..grid.cells_y() * step * width];
    march_rows(grid.view(), atlas, rows, width, band);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(cells_x: usize, cells_y: usize, points: Vec<u8>) -> SampleGrid {
        let mut grid = SampleGrid::new(cells_x, cells_y, 1);
        grid.points_mut().copy_from_slice(&points);
        grid
    }

    #[test]
    fn test_corner_weights() {
        // 1x1 cell grid, points listed row by row: TL TR / BL BR
        let cases: [([u8; 4], u8); 5] = [
            ([1, 0, 0, 0], 8),
            ([0, 1, 0, 0], 4),
            ([0, 0, 0, 1], 2),
            ([0, 0, 1, 0], 1),
            ([1, 1, 1, 1], 15),
        ];
        for (points, expected) in cases {
            let grid = grid_from(1, 1, points.to_vec());
            assert_eq!(cell_code(grid.view(), 0, 0), expected, "{points:?}");
        }
    }

    #[test]
    fn test_diagonal_code() {
        // TL = 1, TR = 0, BR = 1, BL = 0 -> 8 + 2
        let grid = grid_from(1, 1, vec![1, 0, 0, 1]);
        assert_eq!(cell_code(grid.view(), 0, 0), 10);
    }

    #[test]
    fn test_partial_columns_untouched() {
        let stamps = (0..16u8)
            .map(|code| Raster::filled(2, 2, Pixel::new(code, code, code)))
            .collect();
        let atlas = ContourAtlas::from_stamps(stamps, 2).unwrap();

        // 5x3 raster with step 2: 2x1 cells, last column and row are left alone
        let mut raster = Raster::filled(5, 3, Pixel::new(99, 99, 99));
        let grid = grid_from(2, 1, vec![0; 6]);
        march(&mut raster, &grid, &atlas);

        for y in 0..3 {
            for x in 0..5 {
                let expected = if x < 4 && y < 2 { Pixel::BLACK } else { Pixel::new(99, 99, 99) };
                assert_eq!(raster.get(x, y), Some(expected), "({x}, {y})");
            }
        }
    }
}
