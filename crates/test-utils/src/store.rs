//! In-memory raster store for pipeline tests without touching disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use raster_common::{Grid, GridSpec};
use raster_io::{RasterData, RasterIoError, RasterStore};

/// A written raster as recorded by [`MemoryRasterStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRaster {
    pub data: RasterData,
    pub spec: GridSpec,
    pub nodata: Option<f64>,
}

/// [`RasterStore`] backed by a map from path to grid.
///
/// Reads of unknown paths fail with `RasterIoError::NotFound`, exactly like
/// the GeoTIFF store. Writes are recorded and also become readable.
#[derive(Debug, Default)]
pub struct MemoryRasterStore {
    grids: Mutex<HashMap<PathBuf, Grid>>,
    written: Mutex<Vec<(PathBuf, StoredRaster)>>,
}

impl MemoryRasterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, path: impl Into<PathBuf>, grid: Grid) -> Self {
        self.insert(path, grid);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, grid: Grid) {
        self.grids.lock().unwrap().insert(path.into(), grid);
    }

    /// Paths written so far, in write order.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// The most recent raster written to `path`.
    pub fn written(&self, path: &Path) -> Option<StoredRaster> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, r)| r.clone())
    }
}

impl RasterStore for MemoryRasterStore {
    fn read(&self, path: &Path) -> raster_io::Result<Grid> {
        self.grids
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| RasterIoError::NotFound(path.to_path_buf()))
    }

    fn write(
        &self,
        path: &Path,
        data: &RasterData,
        spec: &GridSpec,
        nodata: Option<f64>,
    ) -> raster_io::Result<()> {
        let grid = Grid::new(spec.clone(), data.to_f64_vec(), nodata)?;
        self.grids.lock().unwrap().insert(path.to_path_buf(), grid);
        self.written.lock().unwrap().push((
            path.to_path_buf(),
            StoredRaster {
                data: data.clone(),
                spec: spec.clone(),
                nodata,
            },
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::utm_grid;

    #[test]
    fn test_missing_path_is_not_found() {
        let store = MemoryRasterStore::new();
        let err = store.read(Path::new("missing.tif")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryRasterStore::new();
        let spec = utm_grid(2, 1, 10.0, vec![0.0, 0.0], None).spec().clone();
        let path = Path::new("out/labels.tif");

        store
            .write(path, &RasterData::U8(vec![1, 255]), &spec, Some(255.0))
            .unwrap();

        let grid = store.read(path).unwrap();
        assert_eq!(grid.data(), &[1.0, 255.0]);
        assert_eq!(grid.nodata(), Some(255.0));
        assert_eq!(store.written_paths(), vec![path.to_path_buf()]);
        assert_eq!(store.written(path).unwrap().data, RasterData::U8(vec![1, 255]));
    }
}
