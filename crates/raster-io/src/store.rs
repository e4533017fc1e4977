//! The raster read/write seam used by the comparison pipelines.

use std::path::Path;

use raster_common::{Grid, GridSpec};

use crate::error::Result;
use crate::writer::RasterData;

/// Source and sink of georeferenced rasters.
///
/// Pipelines depend on this trait so they can run against in-memory
/// rasters in tests and against GeoTIFF files in production.
pub trait RasterStore {
    /// Read a single-band raster. Missing paths yield `RasterIoError::NotFound`.
    fn read(&self, path: &Path) -> Result<Grid>;

    /// Write a single-band raster, creating parent directories as needed.
    fn write(&self, path: &Path, data: &RasterData, spec: &GridSpec, nodata: Option<f64>)
        -> Result<()>;
}

/// Filesystem-backed store reading and writing GeoTIFF.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffStore;

impl RasterStore for GeoTiffStore {
    fn read(&self, path: &Path) -> Result<Grid> {
        crate::reader::read_geotiff(path)
    }

    fn write(
        &self,
        path: &Path,
        data: &RasterData,
        spec: &GridSpec,
        nodata: Option<f64>,
    ) -> Result<()> {
        crate::writer::write_geotiff(path, data, spec, nodata)
    }
}
