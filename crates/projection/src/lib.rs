//! Coordinate reference system conversions for grid alignment.
//!
//! The resampler only needs one operation: take a world coordinate in the
//! target grid's CRS and express it in the source grid's CRS. That seam is
//! the [`CoordinateTransform`] trait. Identical CRSs get [`Identity`];
//! anything else goes through proj4rs via [`ProjTransform`].

pub mod epsg;
pub mod proj;
pub mod transform;

pub use epsg::proj_string;
pub use proj::ProjTransform;
pub use transform::{transformer_between, CoordinateTransform, Identity, ProjectionError};
