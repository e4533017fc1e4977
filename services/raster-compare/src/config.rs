//! Comparison run configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration for both analyses.
///
/// Every field has a default, so an empty YAML document (or no file at all)
/// reproduces the standard run layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Directory receiving label rasters and CSV tables
    pub output_dir: PathBuf,

    /// Inundation (classification) analysis
    pub inundation: InundationConfig,

    /// Continuous-variable NRMSE analysis
    pub nrmse: NrmseConfig,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            inundation: InundationConfig::default(),
            nrmse: NrmseConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InundationConfig {
    /// Fine-resolution reference classification
    pub reference_path: PathBuf,

    /// Coarser predictions, processed in this order
    pub prediction_paths: Vec<PathBuf>,

    /// Pixel value meaning "inundated" in both reference and predictions
    pub positive_value: i32,

    /// Label written for background / no-data pixels
    pub nodata_class: u8,

    /// Fill value for aligned pixels with no source coverage
    pub dst_nodata: f64,

    /// Source nodata assumed when a prediction declares none
    pub fallback_src_nodata: f64,

    /// Statistics table file name inside `output_dir`
    pub stats_file: String,

    /// Write `classification_<id>.tif` for every prediction
    pub write_classification_rasters: bool,
}

impl Default for InundationConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("reference_10m.tif"),
            prediction_paths: vec![
                PathBuf::from("prediction_15m.tif"),
                PathBuf::from("prediction_20m.tif"),
                PathBuf::from("prediction_30m.tif"),
            ],
            positive_value: 1,
            nodata_class: 255,
            dst_nodata: -9999.0,
            fallback_src_nodata: -9999.0,
            stats_file: "inundation_stats.csv".to_string(),
            write_classification_rasters: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NrmseConfig {
    /// Root holding one sub-folder per variable
    pub base_folder: PathBuf,

    /// Resolution tag of the reference raster
    pub reference_tag: String,

    /// Resolution tags of the predictions, processed in this order
    pub prediction_tags: Vec<String>,

    /// File name pattern with `{prefix}` and `{tag}` placeholders
    pub file_template: String,

    /// Fill value for aligned pixels with no valid bilinear sample
    pub dst_nodata: f64,

    /// Results table file name inside `output_dir`
    pub results_file: String,

    /// Variables to evaluate, processed in this order
    pub datasets: Vec<NrmseDataset>,
}

impl Default for NrmseConfig {
    fn default() -> Self {
        let datasets = [
            ("depth", "depth"),
            ("speed", "speed"),
            ("solid_frac", "solids_frac"),
            ("time", "Inundation_time"),
            ("erosion", "erosion"),
            ("IP", "impact_pressure"),
        ]
        .into_iter()
        .map(|(folder, prefix)| NrmseDataset::new(folder, prefix, "range"))
        .collect();

        Self {
            base_folder: PathBuf::from("NRMSE"),
            reference_tag: "N10m".to_string(),
            prediction_tags: vec!["N15m".to_string(), "N20m".to_string(), "N30m".to_string()],
            file_template: "Max_{prefix}_{tag}.tif".to_string(),
            dst_nodata: -9999.0,
            results_file: "nrmse_results.csv".to_string(),
            datasets,
        }
    }
}

impl NrmseConfig {
    /// File name for `prefix` at resolution `tag`.
    pub fn file_name(&self, prefix: &str, tag: &str) -> String {
        self.file_template
            .replace("{prefix}", prefix)
            .replace("{tag}", tag)
    }

    /// Folder holding the rasters of `dataset`.
    pub fn dataset_dir(&self, dataset: &NrmseDataset) -> PathBuf {
        self.base_folder.join(&dataset.var_folder)
    }
}

/// One continuous variable to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NrmseDataset {
    /// Sub-folder of `base_folder`
    pub var_folder: String,

    /// File prefix, also reported as the variable name
    pub prefix: String,

    /// `range`, `mean` or `std`; parsed when the dataset is processed
    #[serde(default = "default_normalization")]
    pub normalization: String,
}

fn default_normalization() -> String {
    "range".to_string()
}

impl NrmseDataset {
    pub fn new(var_folder: &str, prefix: &str, normalization: &str) -> Self {
        Self {
            var_folder: var_folder.to_string(),
            prefix: prefix.to_string(),
            normalization: normalization.to_string(),
        }
    }
}

impl CompareConfig {
    /// Load configuration from a YAML file. Missing fields take their defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path.as_ref()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `COMPARE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("COMPARE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("COMPARE_REFERENCE_PATH") {
            self.inundation.reference_path = PathBuf::from(path);
        }
        if let Some(base) = lookup("COMPARE_NRMSE_BASE") {
            self.nrmse.base_folder = PathBuf::from(base);
        }
        if let Some(value) = lookup("COMPARE_POSITIVE_VALUE") {
            self.inundation.positive_value = value
                .trim()
                .parse()
                .with_context(|| format!("COMPARE_POSITIVE_VALUE is not an integer: {}", value))?;
        }
        Ok(())
    }

    /// Check the configuration before any raster is read.
    ///
    /// Normalization names are parsed later, per dataset.
    pub fn validate(&self) -> Result<()> {
        let inundation = &self.inundation;
        anyhow::ensure!(
            !inundation.prediction_paths.is_empty(),
            "At least one inundation prediction path is required"
        );
        anyhow::ensure!(
            inundation.dst_nodata.is_finite() && inundation.fallback_src_nodata.is_finite(),
            "Inundation nodata sentinels must be finite"
        );
        anyhow::ensure!(
            !inundation.stats_file.is_empty(),
            "Inundation stats file name cannot be empty"
        );

        let nrmse = &self.nrmse;
        anyhow::ensure!(
            !nrmse.prediction_tags.is_empty(),
            "At least one NRMSE prediction tag is required"
        );
        anyhow::ensure!(
            nrmse.file_template.contains("{prefix}") && nrmse.file_template.contains("{tag}"),
            "Invalid file template: {}. Must contain {{prefix}} and {{tag}}",
            nrmse.file_template
        );
        anyhow::ensure!(
            nrmse.dst_nodata.is_finite(),
            "NRMSE nodata sentinel must be finite"
        );
        anyhow::ensure!(
            !nrmse.results_file.is_empty(),
            "NRMSE results file name cannot be empty"
        );

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
