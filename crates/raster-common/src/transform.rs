//! Affine transforms between pixel space and world coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};

/// Affine transform mapping pixel `(col, row)` to world `(x, y)`.
///
/// Coefficients use the `(a, b, c, d, e, f)` ordering:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// so the pixel width is coefficient 0 and the pixel height coefficient 4
/// (negative for north-up rasters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// Create a transform from raw coefficients.
    pub fn new(coefficients: [f64; 6]) -> Self {
        Self(coefficients)
    }

    /// Create a north-up transform anchored at the top-left corner.
    ///
    /// # Arguments
    /// * `origin_x` - World X of the top-left corner
    /// * `origin_y` - World Y of the top-left corner
    /// * `pixel_width` - Pixel size along X (positive)
    /// * `pixel_height` - Pixel size along Y (positive, stored negated)
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self([pixel_width, 0.0, origin_x, 0.0, -pixel_height, origin_y])
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }

    pub fn pixel_width(&self) -> f64 {
        self.0[0]
    }

    pub fn pixel_height(&self) -> f64 {
        self.0[4]
    }

    /// Area covered by one pixel, `|a * e|`, in squared CRS units.
    pub fn pixel_area(&self) -> f64 {
        (self.0[0] * self.0[4]).abs()
    }

    /// True when the transform carries no rotation or shear terms.
    pub fn is_north_up(&self) -> bool {
        self.0[1] == 0.0 && self.0[3] == 0.0
    }

    fn determinant(&self) -> f64 {
        self.0[0] * self.0[4] - self.0[1] * self.0[3]
    }

    /// Check that the transform is finite and invertible.
    pub fn validate(&self) -> GeoResult<()> {
        if self.0.iter().any(|c| !c.is_finite()) {
            return Err(self.invalid("non-finite coefficient"));
        }
        if self.determinant() == 0.0 {
            return Err(self.invalid("zero-area pixels"));
        }
        Ok(())
    }

    /// Map a (possibly fractional) pixel position to world coordinates.
    pub fn pixel_to_world(&self, col: f64, row: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * col + b * row + c, d * col + e * row + f)
    }

    /// Compute the inverse transform (world to pixel).
    pub fn inverse(&self) -> GeoResult<GeoTransform> {
        self.validate()?;

        let [a, b, c, d, e, f] = self.0;
        let det = self.determinant();
        let ia = e / det;
        let ib = -b / det;
        let id = -d / det;
        let ie = a / det;

        Ok(GeoTransform([
            ia,
            ib,
            -(ia * c + ib * f),
            id,
            ie,
            -(id * c + ie * f),
        ]))
    }

    fn invalid(&self, reason: &str) -> GeoError {
        GeoError::InvalidTransform {
            coefficients: self.0,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_up_pixel_to_world() {
        let t = GeoTransform::north_up(500_000.0, 4_200_000.0, 10.0, 10.0);
        assert_eq!(t.pixel_to_world(0.0, 0.0), (500_000.0, 4_200_000.0));
        assert_eq!(t.pixel_to_world(1.0, 2.0), (500_010.0, 4_199_980.0));
        assert_eq!(t.pixel_area(), 100.0);
        assert!(t.is_north_up());
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = GeoTransform::new([15.0, 2.0, 1000.0, 1.5, -15.0, 9000.0]);
        let inv = t.inverse().unwrap();

        let (x, y) = t.pixel_to_world(3.25, 7.5);
        let (col, row) = inv.pixel_to_world(x, y);
        assert!((col - 3.25).abs() < 1e-9);
        assert!((row - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_rejected() {
        let t = GeoTransform::new([0.0, 0.0, 0.0, 0.0, -10.0, 0.0]);
        assert!(matches!(t.validate(), Err(GeoError::InvalidTransform { .. })));
        assert!(t.inverse().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let t = GeoTransform::new([10.0, 0.0, f64::NAN, 0.0, -10.0, 0.0]);
        assert!(t.validate().is_err());
    }
}
