//! Error types for raster and table I/O.

use std::path::PathBuf;

use raster_common::GeoError;
use thiserror::Error;

/// Errors that can occur while reading or writing rasters and tables.
#[derive(Error, Debug)]
pub enum RasterIoError {
    /// The requested raster does not exist.
    #[error("raster not found: {}", .0.display())]
    NotFound(PathBuf),

    /// TIFF decode/encode failure.
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// More than one band, or a non-grayscale layout.
    #[error("unsupported raster layout: {0}")]
    UnsupportedLayout(String),

    /// Sample type we cannot widen to f64.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// No ModelTransformation or PixelScale/Tiepoint tags.
    #[error("missing georeferencing tags in {}", .0.display())]
    MissingGeoreference(PathBuf),

    /// Malformed GeoTIFF tag contents.
    #[error("invalid GeoTIFF metadata: {0}")]
    InvalidMetadata(String),

    #[error(transparent)]
    Georeference(#[from] GeoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl RasterIoError {
    /// True for the missing-file case the pipelines treat as skippable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RasterIoError::NotFound(_))
    }
}

/// Result type for raster I/O operations.
pub type Result<T> = std::result::Result<T, RasterIoError>;
