//! Batch orchestration: read, align, compare and accumulate per source.
//!
//! A missing or failing prediction source is logged and skipped; the
//! remaining sources still produce rows. Records keep the configured order.

mod inundation;
mod nrmse;

pub use inundation::run_inundation;
pub use nrmse::run_nrmse;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use raster_io::RasterStore;
use serde::Serialize;
use tracing::info;

use crate::config::CompareConfig;
use crate::report::{write_confusion_table, write_nrmse_table};

/// Which analyses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Analysis {
    #[default]
    All,
    Inundation,
    Nrmse,
}

impl Analysis {
    pub fn includes_inundation(self) -> bool {
        matches!(self, Analysis::All | Analysis::Inundation)
    }

    pub fn includes_nrmse(self) -> bool {
        matches!(self, Analysis::All | Analysis::Nrmse)
    }
}

/// A source that produced no record, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSource {
    pub source: PathBuf,
    pub reason: String,
}

/// Records of one analysis plus the sources it had to skip.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedSource>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    fn skip(&mut self, source: impl Into<PathBuf>, reason: impl ToString) {
        self.skipped.push(SkippedSource {
            source: source.into(),
            reason: reason.to_string(),
        });
    }
}

/// Outcome of [`run`]: tables written and how many sources were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub tables: Vec<PathBuf>,
    pub rows: usize,
    pub skipped: usize,
}

/// Run the selected analyses and write their CSV tables into `output_dir`.
pub fn run(config: &CompareConfig, analysis: Analysis, store: &dyn RasterStore) -> Result<RunSummary> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory {:?}", config.output_dir)
    })?;

    let mut summary = RunSummary::default();

    if analysis.includes_inundation() {
        let report = run_inundation(config, store)?;
        let path = config.output_dir.join(&config.inundation.stats_file);
        write_confusion_table(&path, &report.records)
            .with_context(|| format!("Failed to write {:?}", path))?;
        info!(path = %path.display(), rows = report.records.len(), "Inundation statistics saved");

        summary.rows += report.records.len();
        summary.skipped += report.skipped.len();
        summary.tables.push(path);
    }

    if analysis.includes_nrmse() {
        let report = run_nrmse(config, store)?;
        let path = config.output_dir.join(&config.nrmse.results_file);
        write_nrmse_table(&path, &report.records)
            .with_context(|| format!("Failed to write {:?}", path))?;
        info!(path = %path.display(), rows = report.records.len(), "NRMSE results saved");

        summary.rows += report.records.len();
        summary.skipped += report.skipped.len();
        summary.tables.push(path);
    }

    Ok(summary)
}
