//! Categorical agreement between a reference and an aligned prediction.

use serde::{Deserialize, Serialize};

use crate::error::{GridProcessorError, Result};

/// Per-pixel outcome of comparing two binary classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    TruePositive,
    FalseNegative,
    FalsePositive,
    /// Background: true negatives and pixels with no data in either grid.
    NoData,
}

impl ClassLabel {
    /// Label for a single pixel pair.
    pub fn from_pair(reference_positive: bool, prediction_positive: bool) -> Self {
        match (reference_positive, prediction_positive) {
            (true, true) => Self::TruePositive,
            (true, false) => Self::FalseNegative,
            (false, true) => Self::FalsePositive,
            (false, false) => Self::NoData,
        }
    }

    /// Raster encoding of the label. No-Data is written as `nodata_class`.
    pub fn code(self, nodata_class: u8) -> u8 {
        match self {
            Self::TruePositive => 1,
            Self::FalseNegative => 2,
            Self::FalsePositive => 3,
            Self::NoData => nodata_class,
        }
    }
}

/// Pixel counts for one prediction source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    /// Reference pixels equal to the positive value, counted on their own.
    pub reference_positives: usize,
}

/// Label raster plus counts produced by [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Encoded labels in row-major order (see [`ClassLabel::code`]).
    pub labels: Vec<u8>,
    pub counts: ConfusionCounts,
}

/// Classify every pixel of `reference` against `prediction`.
///
/// Both slices must be on the same grid; the prediction is expected to have
/// been aligned with the nearest kernel. A pixel is positive when it equals
/// `positive_value` exactly, so nodata sentinels and NaN fall into the
/// negative side.
pub fn classify(
    reference: &[f64],
    prediction: &[f64],
    positive_value: f64,
    nodata_class: u8,
) -> Result<Classification> {
    if reference.len() != prediction.len() {
        return Err(GridProcessorError::shape_mismatch(
            reference.len(),
            prediction.len(),
        ));
    }

    let mut counts = ConfusionCounts::default();
    let labels = reference
        .iter()
        .zip(prediction)
        .map(|(&r, &p)| {
            let label = ClassLabel::from_pair(r == positive_value, p == positive_value);
            match label {
                ClassLabel::TruePositive => counts.true_positives += 1,
                ClassLabel::FalseNegative => counts.false_negatives += 1,
                ClassLabel::FalsePositive => counts.false_positives += 1,
                ClassLabel::NoData => {}
            }
            label.code(nodata_class)
        })
        .collect();

    counts.reference_positives = reference.iter().filter(|&&r| r == positive_value).count();

    Ok(Classification { labels, counts })
}

/// Confusion counts expressed as areas and percentages of reference positives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionStatistics {
    /// Identifier of the prediction source (its file stem).
    pub source_id: String,
    pub counts: ConfusionCounts,
    pub pixel_area: f64,
    pub tp_area: f64,
    pub fn_area: f64,
    pub fp_area: f64,
    pub tp_percent: f64,
    pub fn_percent: f64,
    pub fp_percent: f64,
}

impl ConfusionStatistics {
    /// Derive areas and percentages from raw counts.
    ///
    /// `pixel_area` comes from the reference georeference. Percentages are
    /// relative to `counts.reference_positives` and are 0 when the reference
    /// has no positive pixels.
    pub fn new(source_id: impl Into<String>, counts: ConfusionCounts, pixel_area: f64) -> Self {
        let total = counts.reference_positives;
        let percent = |n: usize| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64 * 100.0
            }
        };

        Self {
            source_id: source_id.into(),
            counts,
            pixel_area,
            tp_area: counts.true_positives as f64 * pixel_area,
            fn_area: counts.false_negatives as f64 * pixel_area,
            fp_area: counts.false_positives as f64 * pixel_area,
            tp_percent: percent(counts.true_positives),
            fn_percent: percent(counts.false_negatives),
            fp_percent: percent(counts.false_positives),
        }
    }
}
