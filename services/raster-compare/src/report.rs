//! Result records and their CSV tables.

use std::path::Path;

use grid_processor::{ConfusionStatistics, Normalization, NrmseResult};
use raster_io::write_csv;
use serde::Serialize;

/// Column headers of the confusion statistics table.
pub const CONFUSION_HEADERS: [&str; 10] = [
    "Resolution",
    "True Positives",
    "False Negatives",
    "False Positives",
    "TP Area (m²)",
    "FN Area (m²)",
    "FP Area (m²)",
    "TP (%)",
    "FN (%)",
    "FP (%)",
];

/// Column headers of the NRMSE table.
pub const NRMSE_HEADERS: [&str; 4] = ["variable", "prediction_file", "nrmse", "normalization_method"];

/// NRMSE of one prediction file for one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct NrmseRecord {
    pub variable: String,
    pub prediction_file: String,
    pub rmse: f64,
    pub factor: f64,
    pub normalization: Normalization,
    pub nrmse_percent: f64,
    pub valid_pixels: usize,
}

impl NrmseRecord {
    pub fn new(variable: &str, prediction_file: &str, result: &NrmseResult) -> Self {
        Self {
            variable: variable.to_string(),
            prediction_file: prediction_file.to_string(),
            rmse: result.rmse,
            factor: result.factor,
            normalization: result.normalization,
            nrmse_percent: result.nrmse_percent,
            valid_pixels: result.valid_pixels,
        }
    }

    /// Percentage with two decimals, e.g. `2.50%`.
    pub fn formatted_nrmse(&self) -> String {
        format!("{:.2}%", self.nrmse_percent)
    }
}

#[derive(Serialize)]
struct ConfusionRow<'a> {
    resolution: &'a str,
    true_positives: usize,
    false_negatives: usize,
    false_positives: usize,
    tp_area: f64,
    fn_area: f64,
    fp_area: f64,
    tp_percent: f64,
    fn_percent: f64,
    fp_percent: f64,
}

impl<'a> From<&'a ConfusionStatistics> for ConfusionRow<'a> {
    fn from(stats: &'a ConfusionStatistics) -> Self {
        Self {
            resolution: &stats.source_id,
            true_positives: stats.counts.true_positives,
            false_negatives: stats.counts.false_negatives,
            false_positives: stats.counts.false_positives,
            tp_area: stats.tp_area,
            fn_area: stats.fn_area,
            fp_area: stats.fp_area,
            tp_percent: stats.tp_percent,
            fn_percent: stats.fn_percent,
            fp_percent: stats.fp_percent,
        }
    }
}

#[derive(Serialize)]
struct NrmseRow<'a> {
    variable: &'a str,
    prediction_file: &'a str,
    nrmse: String,
    normalization_method: &'static str,
}

impl<'a> From<&'a NrmseRecord> for NrmseRow<'a> {
    fn from(record: &'a NrmseRecord) -> Self {
        Self {
            variable: &record.variable,
            prediction_file: &record.prediction_file,
            nrmse: record.formatted_nrmse(),
            normalization_method: record.normalization.as_str(),
        }
    }
}

/// Write one row per prediction source, in the given order.
pub fn write_confusion_table(path: &Path, stats: &[ConfusionStatistics]) -> raster_io::Result<()> {
    let rows: Vec<ConfusionRow> = stats.iter().map(ConfusionRow::from).collect();
    write_csv(path, &CONFUSION_HEADERS, &rows)
}

/// Write one row per (variable, prediction file) pair, in the given order.
pub fn write_nrmse_table(path: &Path, records: &[NrmseRecord]) -> raster_io::Result<()> {
    let rows: Vec<NrmseRow> = records.iter().map(NrmseRow::from).collect();
    write_csv(path, &NRMSE_HEADERS, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_processor::ConfusionCounts;

    fn record(variable: &str, file: &str, percent: f64) -> NrmseRecord {
        NrmseRecord {
            variable: variable.to_string(),
            prediction_file: file.to_string(),
            rmse: 0.0,
            factor: 1.0,
            normalization: Normalization::Range,
            nrmse_percent: percent,
            valid_pixels: 1,
        }
    }

    #[test]
    fn test_formatted_nrmse() {
        assert_eq!(record("depth", "f", 2.5).formatted_nrmse(), "2.50%");
        assert_eq!(record("depth", "f", 0.0).formatted_nrmse(), "0.00%");
        assert_eq!(record("depth", "f", 12.3456).formatted_nrmse(), "12.35%");
    }

    #[test]
    fn test_nrmse_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nrmse_results.csv");

        let records = vec![
            record("depth", "Max_depth_N15m.tif", 2.5),
            record("speed", "Max_speed_N30m.tif", 10.0),
        ];
        write_nrmse_table(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "variable,prediction_file,nrmse,normalization_method\n\
             depth,Max_depth_N15m.tif,2.50%,range\n\
             speed,Max_speed_N30m.tif,10.00%,range\n"
        );
    }

    #[test]
    fn test_confusion_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inundation_stats.csv");

        let counts = ConfusionCounts {
            true_positives: 3,
            false_negatives: 1,
            false_positives: 0,
            reference_positives: 4,
        };
        let stats = vec![ConfusionStatistics::new("prediction_15m", counts, 100.0)];
        write_confusion_table(&path, &stats).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Resolution,True Positives,False Negatives,False Positives,\
             TP Area (m²),FN Area (m²),FP Area (m²),TP (%),FN (%),FP (%)"
        );
        assert_eq!(
            lines.next().unwrap(),
            "prediction_15m,3,1,0,300.0,100.0,0.0,75.0,25.0,0.0"
        );
        assert!(lines.next().is_none());
    }
}
