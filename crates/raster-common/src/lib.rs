//! Common georeferencing types shared by every crate in the raster-compare workspace.
//!
//! A [`Grid`] is a row-major array of samples bound to a [`GridSpec`]: its
//! shape, an affine [`GeoTransform`], and a [`Crs`]. Validity is tracked with
//! an explicit [`ValidityMask`] rather than by poisoning samples.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod mask;
pub mod transform;

pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{GeoError, GeoResult};
pub use grid::{Grid, GridSpec};
pub use mask::ValidityMask;
pub use transform::GeoTransform;
