//! Binary sample grid construction.
//!
//! A `W x H` raster with step `s` has `cells_x = W / s` by `cells_y = H / s`
//! full cells and `(cells_x + 1) x (cells_y + 1)` sample points. Point
//! `(gx, gy)` reads pixel `(gx * s, gy * s)`. The last point column has no
//! full step to its right, so it reads the raster's last pixel column
//! instead, and the last point row reads the last pixel row. The corner
//! point is always 0.
//!
//! Points are stored row-major by grid row, `cells_x + 1` points per row.

use std::ops::Range;

use contour_common::{ContourConfig, Pixel, Raster, RasterView};

/// 1 when the pixel is at or below the luminance threshold.
#[inline]
fn threshold(pixel: Pixel, sigma: u8) -> u8 {
    if pixel.luminance() > sigma {
        0
    } else {
        1
    }
}

/// Owned binary sample grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    cells_x: usize,
    cells_y: usize,
    points: Vec<u8>,
}

impl SampleGrid {
    /// Allocate a zeroed grid for a `width x height` raster.
    pub fn new(width: usize, height: usize, step: usize) -> Self {
        let cells_x = width / step;
        let cells_y = height / step;
        Self {
            cells_x,
            cells_y,
            points: vec![0; (cells_x + 1) * (cells_y + 1)],
        }
    }

    /// Number of full cells horizontally.
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    /// Number of full cells vertically.
    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    /// Points per grid row.
    pub fn stride(&self) -> usize {
        self.cells_x + 1
    }

    pub fn get(&self, gx: usize, gy: usize) -> u8 {
        self.points[gy * self.stride() + gx]
    }

    pub fn points(&self) -> &[u8] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [u8] {
        &mut self.points
    }

    /// Indices of grid rows `rows` (interior points plus the boundary column).
    pub fn row_span(&self, rows: Range<usize>) -> Range<usize> {
        rows.start * self.stride()..rows.end * self.stride()
    }

    /// Indices of boundary-row points `cols`.
    pub fn boundary_span(&self, cols: Range<usize>) -> Range<usize> {
        let base = self.cells_y * self.stride();
        base + cols.start..base + cols.end
    }

    /// Index of the corner point `(cells_x, cells_y)`.
    pub fn corner_index(&self) -> usize {
        self.cells_y * self.stride() + self.cells_x
    }

    pub fn view(&self) -> GridView<'_> {
        GridView {
            cells_x: self.cells_x,
            cells_y: self.cells_y,
            points: &self.points,
        }
    }
}

/// Borrowed, read-only form of a [`SampleGrid`].
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    cells_x: usize,
    cells_y: usize,
    points: &'a [u8],
}

impl<'a> GridView<'a> {
    /// View points laid out like [`SampleGrid`].
    pub fn new(cells_x: usize, cells_y: usize, points: &'a [u8]) -> Self {
        assert_eq!(points.len(), (cells_x + 1) * (cells_y + 1));
        Self {
            cells_x,
            cells_y,
            points,
        }
    }

    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    #[inline]
    pub fn get(&self, gx: usize, gy: usize) -> u8 {
        self.points[gy * (self.cells_x + 1) + gx]
    }
}

/// Sample grid rows `rows`, interior points and the boundary column.
///
/// `out` holds exactly those rows, `cells_x + 1` points each.
pub fn sample_rows(
    raster: RasterView<'_>,
    config: &ContourConfig,
    rows: Range<usize>,
    out: &mut [u8],
) {
    let step = config.step;
    let cells_x = raster.width() / step;
    let last_x = raster.width().saturating_sub(1);
    debug_assert_eq!(out.len(), rows.len() * (cells_x + 1));

    for (gy, row) in rows.zip(out.chunks_exact_mut(cells_x + 1)) {
        let y = gy * step;
        for (gx, point) in row[..cells_x].iter_mut().enumerate() {
            *point = threshold(raster.pixel(gx * step, y), config.sigma);
        }
        row[cells_x] = threshold(raster.pixel(last_x, y), config.sigma);
    }
}

/// Sample boundary-row points `cols` from the raster's last pixel row.
pub fn sample_boundary_row(
    raster: RasterView<'_>,
    config: &ContourConfig,
    cols: Range<usize>,
    out: &mut [u8],
) {
    debug_assert_eq!(out.len(), cols.len());
    let last_y = raster.height().saturating_sub(1);

    for (gx, point) in cols.zip(out.iter_mut()) {
        *point = threshold(raster.pixel(gx * config.step, last_y), config.sigma);
    }
}

/// Build the whole sample grid on the calling thread.
pub fn sample_grid(raster: &Raster, config: &ContourConfig) -> SampleGrid {
    let mut grid = SampleGrid::new(raster.width(), raster.height(), config.step);
    let (cells_x, cells_y) = (grid.cells_x(), grid.cells_y());

    let rows = grid.row_span(0..cells_y);
    let boundary = grid.boundary_span(0..cells_x);
    let corner = grid.corner_index();
    let points = grid.points_mut();

    sample_rows(raster.view(), config, 0..cells_y, &mut points[rows]);
    sample_boundary_row(raster.view(), config, 0..cells_x, &mut points[boundary]);
    points[corner] = 0;

    grid
}
