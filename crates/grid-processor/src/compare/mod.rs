//! Comparison of a reference grid against an aligned prediction.
//!
//! - [`classification`]: per-pixel TP/FN/FP labels and confusion statistics
//! - [`nrmse`]: masked RMSE normalized by a reference-derived factor

pub mod classification;
pub mod nrmse;

pub use classification::{
    classify, ClassLabel, Classification, ConfusionCounts, ConfusionStatistics,
};
pub use nrmse::{compute_grid_nrmse, compute_nrmse, Normalization, NrmseResult};
