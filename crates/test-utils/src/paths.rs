//! On-disk fixtures for tests that go through the PPM files.

use std::path::{Path, PathBuf};

use contour_common::Raster;
use ppm::PpmFormat;
use tempfile::TempDir;

/// Write `stamps` as `{dir}/{code}.ppm`.
pub fn write_atlas_dir(dir: &Path, stamps: &[Raster], format: PpmFormat) -> ppm::PpmResult<()> {
    for (code, stamp) in stamps.iter().enumerate() {
        ppm::write_ppm(dir.join(format!("{code}.ppm")), stamp, format)?;
    }
    Ok(())
}

/// A temporary directory holding a binary PPM atlas of `stamps`.
///
/// The directory is deleted when the returned handle drops.
pub fn temp_atlas_dir(stamps: &[Raster]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_atlas_dir(dir.path(), stamps, PpmFormat::Binary).expect("failed to write atlas");
    dir
}

/// Write `raster` into `dir` under `name` and return the path.
pub fn write_temp_ppm(dir: &Path, name: &str, raster: &Raster, format: PpmFormat) -> PathBuf {
    let path = dir.join(name);
    ppm::write_ppm(&path, raster, format).expect("failed to write ppm");
    path
}
