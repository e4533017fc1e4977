//! Normalized root-mean-square error between continuous grids.

use std::fmt;
use std::str::FromStr;

use raster_common::{Grid, ValidityMask};
use serde::{Deserialize, Serialize};

use crate::error::{GridProcessorError, Result};

/// Scale used to normalize the RMSE, computed from valid reference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// max - min
    Range,
    /// Absolute value of the arithmetic mean, not the signed mean, so a
    /// negative-mean field still yields a non-negative NRMSE.
    Mean,
    /// Population standard deviation
    Std,
}

impl Normalization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Mean => "mean",
            Self::Std => "std",
        }
    }

    /// Normalization factor over `values`. Callers guarantee `values` is non-empty.
    fn factor(&self, values: &[f64]) -> f64 {
        let n = values.len() as f64;
        match self {
            Self::Range => {
                let (min, max) = values
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                max - min
            }
            Self::Mean => (values.iter().sum::<f64>() / n).abs(),
            Self::Std => {
                let mean = values.iter().sum::<f64>() / n;
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                variance.sqrt()
            }
        }
    }
}

impl FromStr for Normalization {
    type Err = GridProcessorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "range" => Ok(Self::Range),
            "mean" => Ok(Self::Mean),
            "std" => Ok(Self::Std),
            _ => Err(GridProcessorError::configuration(format!(
                "Invalid normalization method '{}'. Choose 'range', 'mean', or 'std'.",
                s
            ))),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single NRMSE computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NrmseResult {
    pub rmse: f64,
    pub normalization: Normalization,
    pub factor: f64,
    /// `rmse / factor * 100`
    pub nrmse_percent: f64,
    /// Number of pixels valid in both grids.
    pub valid_pixels: usize,
}

/// Compute NRMSE over pixels valid in both inputs.
///
/// RMSE and the normalization factor are both restricted to the joint
/// validity mask.
///
/// # Errors
/// * `ShapeMismatch` if arrays and masks differ in length
/// * `InsufficientData` if no pixel is valid in both inputs
/// * `DegenerateNormalization` if the factor is zero or not finite
pub fn compute_nrmse(
    reference: &[f64],
    reference_mask: &ValidityMask,
    prediction: &[f64],
    prediction_mask: &ValidityMask,
    normalization: Normalization,
) -> Result<NrmseResult> {
    if reference.len() != prediction.len() {
        return Err(GridProcessorError::shape_mismatch(
            reference.len(),
            prediction.len(),
        ));
    }
    if reference_mask.len() != reference.len() {
        return Err(GridProcessorError::shape_mismatch(
            reference.len(),
            reference_mask.len(),
        ));
    }
    let joint = reference_mask.and(prediction_mask)?;

    let reference_valid: Vec<f64> = joint.select(reference).collect();
    if reference_valid.is_empty() {
        return Err(GridProcessorError::insufficient_data(
            "no pixels are valid in both reference and prediction",
        ));
    }

    let sum_sq: f64 = reference_valid
        .iter()
        .zip(joint.select(prediction))
        .map(|(r, p)| (p - r).powi(2))
        .sum();
    let rmse = (sum_sq / reference_valid.len() as f64).sqrt();

    let factor = normalization.factor(&reference_valid);
    if factor == 0.0 || !factor.is_finite() {
        return Err(GridProcessorError::DegenerateNormalization {
            method: normalization.to_string(),
            factor,
        });
    }

    Ok(NrmseResult {
        rmse,
        normalization,
        factor,
        nrmse_percent: rmse / factor * 100.0,
        valid_pixels: reference_valid.len(),
    })
}

/// [`compute_nrmse`] on grids, deriving each validity mask from the grid's
/// own nodata sentinel and non-finite samples.
pub fn compute_grid_nrmse(
    reference: &Grid,
    prediction: &Grid,
    normalization: Normalization,
) -> Result<NrmseResult> {
    compute_nrmse(
        reference.data(),
        &reference.validity_mask(),
        prediction.data(),
        &prediction.validity_mask(),
        normalization,
    )
}
