//! NRMSE of continuous variables across resolutions.

use anyhow::{Context, Result};
use grid_processor::{align, compute_grid_nrmse, Normalization, NrmseResult, ResamplingKernel};
use raster_common::Grid;
use raster_io::RasterStore;
use tracing::{error, info, warn};

use super::BatchReport;
use crate::config::{CompareConfig, NrmseConfig, NrmseDataset};
use crate::report::NrmseRecord;

/// Compute NRMSE for every configured dataset and prediction tag.
///
/// Datasets with an unknown normalization method or a missing reference
/// produce no records; missing predictions are skipped individually.
pub fn run_nrmse(
    config: &CompareConfig,
    store: &dyn RasterStore,
) -> Result<BatchReport<NrmseRecord>> {
    let settings = &config.nrmse;
    let mut report = BatchReport::default();

    for dataset in &settings.datasets {
        info!(variable = %dataset.var_folder, "Processing {} dataset", dataset.var_folder);
        process_dataset(settings, dataset, store, &mut report);
    }

    Ok(report)
}

fn process_dataset(
    settings: &NrmseConfig,
    dataset: &NrmseDataset,
    store: &dyn RasterStore,
    report: &mut BatchReport<NrmseRecord>,
) {
    let dir = settings.dataset_dir(dataset);

    let normalization = match dataset.normalization.parse::<Normalization>() {
        Ok(n) => n,
        Err(e) => {
            error!(variable = %dataset.prefix, error = %e, "Skipping dataset");
            report.skip(&dir, e);
            return;
        }
    };

    let reference_path = dir.join(settings.file_name(&dataset.prefix, &settings.reference_tag));
    let reference = match store.read(&reference_path) {
        Ok(grid) => grid,
        Err(e) => {
            error!(path = %reference_path.display(), error = %e, "Reference file not available");
            report.skip(&reference_path, e);
            return;
        }
    };

    for tag in &settings.prediction_tags {
        let file_name = settings.file_name(&dataset.prefix, tag);
        let path = dir.join(&file_name);

        let prediction = match store.read(&path) {
            Ok(grid) => grid,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Prediction file not available, skipping");
                report.skip(&path, e);
                continue;
            }
        };

        match compare_prediction(settings, &reference, &prediction, normalization) {
            Ok(result) => {
                let record = NrmseRecord::new(&dataset.prefix, &file_name, &result);
                info!(
                    rmse = record.rmse,
                    factor = record.factor,
                    valid_pixels = record.valid_pixels,
                    "NRMSE for {} (bilinear interpolation): {} (normalization: {})",
                    file_name,
                    record.formatted_nrmse(),
                    normalization
                );
                report.records.push(record);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "NRMSE computation failed, skipping");
                report.skip(&path, format!("{:#}", e));
            }
        }
    }
}

fn compare_prediction(
    settings: &NrmseConfig,
    reference: &Grid,
    prediction: &Grid,
    normalization: Normalization,
) -> Result<NrmseResult> {
    let aligned = align(
        prediction,
        reference.spec(),
        ResamplingKernel::Bilinear,
        prediction.nodata(),
        settings.dst_nodata,
    )
    .context("Alignment failed")?;

    Ok(compute_grid_nrmse(reference, &aligned, normalization)?)
}
