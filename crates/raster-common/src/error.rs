//! Error types for georeferencing operations.

use thiserror::Error;

/// Result type alias using GeoError.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised while building or interpreting a georeference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid geotransform {coefficients:?}: {reason}")]
    InvalidTransform {
        coefficients: [f64; 6],
        reason: String,
    },

    #[error("Undefined coordinate reference system")]
    UndefinedCrs,

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Shape mismatch: expected {expected} samples, found {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Empty grid: {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
}
