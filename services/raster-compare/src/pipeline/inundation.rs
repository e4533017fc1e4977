//! Inundation extent comparison.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_processor::{align, classify, ConfusionStatistics, ResamplingKernel};
use raster_common::Grid;
use raster_io::{RasterData, RasterStore};
use tracing::{error, info, warn};

use super::BatchReport;
use crate::config::{CompareConfig, InundationConfig};

/// Compare every configured prediction against the reference classification.
///
/// A missing reference yields an empty report. Each prediction is aligned
/// onto the reference grid with the nearest kernel, classified, and its
/// label raster written when enabled.
pub fn run_inundation(
    config: &CompareConfig,
    store: &dyn RasterStore,
) -> Result<BatchReport<ConfusionStatistics>> {
    let settings = &config.inundation;
    let mut report = BatchReport::default();

    let reference = match store.read(&settings.reference_path) {
        Ok(grid) => grid,
        Err(e) => {
            error!(
                path = %settings.reference_path.display(),
                error = %e,
                "Failed to read reference raster"
            );
            report.skip(&settings.reference_path, e);
            return Ok(report);
        }
    };

    info!(
        path = %settings.reference_path.display(),
        width = reference.width(),
        height = reference.height(),
        positives = reference.count_equal(f64::from(settings.positive_value)),
        pixel_area = reference.spec().pixel_area(),
        "Loaded reference raster"
    );

    for path in &settings.prediction_paths {
        let prediction = match store.read(path) {
            Ok(grid) => grid,
            Err(e) if e.is_not_found() => {
                warn!(path = %path.display(), "Prediction file not found, skipping");
                report.skip(path, e);
                continue;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read prediction, skipping");
                report.skip(path, e);
                continue;
            }
        };

        match compare_prediction(config, store, &reference, path, &prediction) {
            Ok(stats) => report.records.push(stats),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Inundation comparison failed, skipping");
                report.skip(path, format!("{:#}", e));
            }
        }
    }

    Ok(report)
}

fn compare_prediction(
    config: &CompareConfig,
    store: &dyn RasterStore,
    reference: &Grid,
    path: &Path,
    prediction: &Grid,
) -> Result<ConfusionStatistics> {
    let settings = &config.inundation;
    let id = source_id(path);
    let src_nodata = prediction.nodata().unwrap_or(settings.fallback_src_nodata);

    let aligned = align(
        prediction,
        reference.spec(),
        ResamplingKernel::Nearest,
        Some(src_nodata),
        settings.dst_nodata,
    )
    .context("Alignment failed")?;

    let classification = classify(
        reference.data(),
        aligned.data(),
        f64::from(settings.positive_value),
        settings.nodata_class,
    )?;

    if settings.write_classification_rasters {
        let output_path = label_raster_path(&config.output_dir, &id);
        store
            .write(
                &output_path,
                &RasterData::U8(classification.labels),
                reference.spec(),
                Some(f64::from(settings.nodata_class)),
            )
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        info!(path = %output_path.display(), "Classification raster saved");
    }

    let stats = ConfusionStatistics::new(id, classification.counts, reference.spec().pixel_area());
    log_statistics(settings, &stats);
    Ok(stats)
}

fn log_statistics(settings: &InundationConfig, stats: &ConfusionStatistics) {
    info!(
        source = %stats.source_id,
        positive_value = settings.positive_value,
        tp = stats.counts.true_positives,
        fn_ = stats.counts.false_negatives,
        fp = stats.counts.false_positives,
        "{}: TP {:.2}%, FN {:.2}%, FP {:.2}%",
        stats.source_id,
        stats.tp_percent,
        stats.fn_percent,
        stats.fp_percent
    );
}

/// Identifier of a prediction source: its file name up to the first dot.
pub(crate) fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

pub(crate) fn label_raster_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("classification_{}.tif", id))
}
