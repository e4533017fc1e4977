//! Bounding box of a grid in its own CRS units.

use serde::{Deserialize, Serialize};

/// An axis-aligned extent in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all of the given points.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self::new(first.0, first.1, first.0, first.1);

        Some(rest.iter().fold(init, |acc, &(x, y)| Self {
            min_x: acc.min_x.min(x),
            min_y: acc.min_y.min(y),
            max_x: acc.max_x.max(x),
            max_y: acc.max_y.max(y),
        }))
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(&[(10.0, 5.0), (-2.0, 8.0), (4.0, -1.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 10.0, 8.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        let touching = BoundingBox::new(10.0, 0.0, 20.0, 10.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&touching));
    }
}
