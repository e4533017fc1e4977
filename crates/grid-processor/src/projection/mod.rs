//! Resampling of grids onto a common pixel geometry.
//!
//! This module maps target pixel centres through coordinate transforms and
//! samples the source grid with a nearest or bilinear kernel.

pub mod align;
pub mod interpolation;

pub use align::align;
pub use interpolation::{bilinear_interpolate, nearest_interpolate};
