//! Explicit validity masks.
//!
//! Every reduction over a grid (mean, min, max, std, counts) must first be
//! restricted to the valid samples; the mask is carried alongside the data
//! instead of being folded into it.

use crate::error::{GeoError, GeoResult};

/// Boolean mask, `true` where the corresponding sample is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    valid: Vec<bool>,
}

impl ValidityMask {
    /// Build a mask from a nodata sentinel.
    ///
    /// A sample is valid when it is finite and not equal to `nodata`.
    pub fn from_sentinel(data: &[f64], nodata: Option<f64>) -> Self {
        let valid = data
            .iter()
            .map(|&v| v.is_finite() && nodata.map_or(true, |nd| v != nd))
            .collect();
        Self { valid }
    }

    pub fn all_valid(len: usize) -> Self {
        Self {
            valid: vec![true; len],
        }
    }

    pub fn from_vec(valid: Vec<bool>) -> Self {
        Self { valid }
    }

    /// Pixel-wise AND of two masks of the same length.
    pub fn and(&self, other: &ValidityMask) -> GeoResult<ValidityMask> {
        if self.valid.len() != other.valid.len() {
            return Err(GeoError::ShapeMismatch {
                expected: self.valid.len(),
                actual: other.valid.len(),
            });
        }

        let valid = self
            .valid
            .iter()
            .zip(&other.valid)
            .map(|(&a, &b)| a && b)
            .collect();
        Ok(Self { valid })
    }

    pub fn len(&self) -> usize {
        self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Number of valid samples.
    pub fn count_valid(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.valid.get(index).copied().unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.valid
    }

    /// Iterate the values of `data` whose mask entry is set.
    pub fn select<'a>(&'a self, data: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        data.iter()
            .zip(&self.valid)
            .filter_map(|(&v, &ok)| ok.then_some(v))
    }
}
