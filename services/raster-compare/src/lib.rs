//! Reference-versus-prediction raster comparison service.
//!
//! Runs two batch analyses over a fixed set of prediction rasters:
//!
//! - **Inundation**: nearest alignment, TP/FN/FP label rasters and
//!   area-based confusion statistics (`inundation_stats.csv`)
//! - **NRMSE**: bilinear alignment and normalized RMSE per variable and
//!   resolution (`nrmse_results.csv`)

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{CompareConfig, InundationConfig, NrmseConfig, NrmseDataset};
pub use pipeline::{run, run_inundation, run_nrmse, Analysis, BatchReport, RunSummary, SkippedSource};
pub use report::{write_confusion_table, write_nrmse_table, NrmseRecord};
