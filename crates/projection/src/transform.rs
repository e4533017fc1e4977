//! The coordinate transform seam used by the resampler.

use raster_common::{Crs, GeoError};
use thiserror::Error;

use crate::proj::ProjTransform;

/// Errors raised while building or applying a CRS conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("EPSG:{0} has no known projection definition")]
    UnsupportedEpsg(u32),

    #[error("invalid projection definition for EPSG:{code}: {message}")]
    InvalidDefinition { code: u32, message: String },

    #[error("coordinate transform failed at ({x}, {y}): {message}")]
    TransformFailed { x: f64, y: f64, message: String },

    #[error(transparent)]
    Georeference(#[from] GeoError),
}

/// Converts world coordinates from one CRS into another.
pub trait CoordinateTransform {
    /// Convert a single `(x, y)` point.
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError>;

    /// True when `transform` returns its input unchanged.
    fn is_identity(&self) -> bool {
        false
    }
}

/// No-op transform for grids that share a CRS.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordinateTransform for Identity {
    #[inline]
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        Ok((x, y))
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Build the transform that maps coordinates in `from` into `to`.
///
/// Both CRSs must be defined. Equal codes short-circuit to [`Identity`].
pub fn transformer_between(
    from: &Crs,
    to: &Crs,
) -> Result<Box<dyn CoordinateTransform>, ProjectionError> {
    let from_code = from.require_epsg()?;
    let to_code = to.require_epsg()?;

    if from_code == to_code {
        return Ok(Box::new(Identity));
    }

    Ok(Box::new(ProjTransform::new(from_code, to_code)?))
}
