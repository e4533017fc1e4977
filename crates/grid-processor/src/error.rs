//! Error types for grid alignment and comparison.

use projection::ProjectionError;
use raster_common::GeoError;
use thiserror::Error;

/// Errors that can occur while aligning or comparing grids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridProcessorError {
    /// Invalid normalization method, malformed georeference, undefined CRS.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Nothing left to compare after masking.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// The normalization factor is zero (e.g. a constant reference field).
    #[error("degenerate normalization: {method} factor is {factor}")]
    DegenerateNormalization { method: String, factor: f64 },

    /// Arrays or masks that should share a shape do not.
    #[error("shape mismatch: expected {expected} samples, found {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// CRS conversion could not be set up.
    #[error("projection error: {0}")]
    Projection(String),
}

impl GridProcessorError {
    /// Create a Configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an InsufficientData error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}

impl From<GeoError> for GridProcessorError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::ShapeMismatch { expected, actual } => Self::ShapeMismatch { expected, actual },
            other => Self::Configuration(other.to_string()),
        }
    }
}

impl From<ProjectionError> for GridProcessorError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::Georeference(geo) => geo.into(),
            other => Self::Projection(other.to_string()),
        }
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
