//! Grid alignment and comparison engine.
//!
//! This crate resamples prediction grids onto a reference grid and measures
//! how well they agree. It provides:
//!
//! - **Alignment**: nearest and bilinear resampling across transforms and CRSs
//! - **Classification**: TP/FN/FP labelling with area-based confusion statistics
//! - **NRMSE**: masked RMSE normalized by range, mean or standard deviation
//!
//! # Architecture
//!
//! ```text
//! prediction Grid ──► align(target = reference spec)
//!                         │
//!                         ├─► target pixel centre → world (target transform)
//!                         ├─► target CRS → source CRS (CoordinateTransform)
//!                         ├─► world → source pixel (inverse source transform)
//!                         └─► sample (nearest | bilinear)
//!                                  │
//!                                  ▼
//!                           aligned Grid
//!                                  │
//!                 ┌────────────────┴────────────────┐
//!                 ▼                                 ▼
//!           classify()                      compute_nrmse()
//!      labels + ConfusionCounts               NrmseResult
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{align, classify, ConfusionStatistics, ResamplingKernel};
//!
//! let aligned = align(&prediction, reference.spec(), ResamplingKernel::Nearest, Some(-9999.0), -9999.0)?;
//! let result = classify(reference.data(), aligned.data(), 1.0, 255)?;
//! let stats = ConfusionStatistics::new("prediction_15m", result.counts, reference.spec().pixel_area());
//! ```

pub mod compare;
pub mod error;
pub mod projection;
pub mod types;

// Re-export commonly used types at crate root
pub use compare::{
    classify, compute_grid_nrmse, compute_nrmse, ClassLabel, Classification, ConfusionCounts,
    ConfusionStatistics, Normalization, NrmseResult,
};
pub use error::{GridProcessorError, Result};
pub use projection::{align, bilinear_interpolate, nearest_interpolate};
pub use types::ResamplingKernel;
