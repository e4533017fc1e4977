//! Georeferenced grids.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::crs::Crs;
use crate::error::{GeoError, GeoResult};
use crate::mask::ValidityMask;
use crate::transform::GeoTransform;

/// Shape and placement of a raster: everything but the samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Pixel-to-world affine transform
    pub transform: GeoTransform,
    /// Coordinate reference system of the world coordinates
    pub crs: Crs,
}

impl GridSpec {
    pub fn new(width: usize, height: usize, transform: GeoTransform, crs: Crs) -> Self {
        Self {
            width,
            height,
            transform,
            crs,
        }
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Area of a single pixel, `|transform[0] * transform[4]|`.
    pub fn pixel_area(&self) -> f64 {
        self.transform.pixel_area()
    }

    /// World coordinates of the centre of pixel `(col, row)`.
    pub fn pixel_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.transform
            .pixel_to_world(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Extent covered by the grid (outer pixel edges).
    pub fn extent(&self) -> BoundingBox {
        let (w, h) = (self.width as f64, self.height as f64);
        let corners = [
            self.transform.pixel_to_world(0.0, 0.0),
            self.transform.pixel_to_world(w, 0.0),
            self.transform.pixel_to_world(0.0, h),
            self.transform.pixel_to_world(w, h),
        ];
        BoundingBox::from_points(&corners).unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Check that the spec can be used for resampling.
    ///
    /// Fails for empty shapes, non-invertible transforms and undefined CRS.
    pub fn validate(&self) -> GeoResult<()> {
        if self.is_empty() {
            return Err(GeoError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        self.transform.validate()?;
        self.crs.require_epsg()?;
        Ok(())
    }
}

/// A 2D array of samples tied to a [`GridSpec`].
///
/// The shape is fixed at construction; samples are stored row-major,
/// top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    spec: GridSpec,
    data: Vec<f64>,
    nodata: Option<f64>,
}

impl Grid {
    /// Create a grid, checking that `data` matches the spec's shape.
    pub fn new(spec: GridSpec, data: Vec<f64>, nodata: Option<f64>) -> GeoResult<Self> {
        if data.len() != spec.len() {
            return Err(GeoError::ShapeMismatch {
                expected: spec.len(),
                actual: data.len(),
            });
        }
        Ok(Self { spec, data, nodata })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn width(&self) -> usize {
        self.spec.width
    }

    pub fn height(&self) -> usize {
        self.spec.height
    }

    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.spec.width || row >= self.spec.height {
            return None;
        }
        self.data.get(row * self.spec.width + col).copied()
    }

    /// Mask of samples that are finite and not the nodata sentinel.
    pub fn validity_mask(&self) -> ValidityMask {
        ValidityMask::from_sentinel(&self.data, self.nodata)
    }

    /// Number of samples exactly equal to `value`.
    pub fn count_equal(&self, value: f64) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    pub fn into_parts(self) -> (GridSpec, Vec<f64>, Option<f64>) {
        (self.spec, self.data, self.nodata)
    }
}
