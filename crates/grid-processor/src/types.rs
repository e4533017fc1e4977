//! Core types for grid alignment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GridProcessorError;

/// Interpolation kernel used when resampling a source grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingKernel {
    /// Value of the source cell containing the sample point (categorical data).
    #[default]
    Nearest,
    /// Weighted average of the four surrounding cell centres (continuous data).
    Bilinear,
}

impl FromStr for ResamplingKernel {
    type Err = GridProcessorError;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            _ => Err(GridProcessorError::configuration(format!(
                "unknown resampling kernel '{}'. Choose 'nearest' or 'bilinear'.",
                s
            ))),
        }
    }
}

impl fmt::Display for ResamplingKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}
