//! Raster and table I/O for the comparison pipelines.
//!
//! - [`read_geotiff`] / [`write_geotiff`]: single-band GeoTIFF with the
//!   affine transform, EPSG code and GDAL nodata sentinel.
//! - [`RasterStore`]: the read/write seam the pipelines depend on, with
//!   [`GeoTiffStore`] as the filesystem implementation.
//! - [`write_csv`]: header-first CSV tables from serde rows.

pub mod error;
pub mod geokeys;
pub mod reader;
pub mod store;
pub mod table;
pub mod writer;

pub use error::{RasterIoError, Result};
pub use reader::read_geotiff;
pub use store::{GeoTiffStore, RasterStore};
pub use table::write_csv;
pub use writer::{write_geotiff, RasterData};
