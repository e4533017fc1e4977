//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeoError, GeoResult};

/// EPSG codes of the geographic (lon/lat in degrees) systems we recognise.
const GEOGRAPHIC_CODES: &[u32] = &[4326, 4269, 4258, 4283, 4617];

/// Coordinate reference system attached to a raster.
///
/// Only the identifier is carried here; the projection math itself lives
/// behind the `projection` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Crs {
    /// A CRS identified by its EPSG code.
    Epsg(u32),
    /// The raster declared no CRS.
    #[default]
    Undefined,
}

impl Crs {
    pub fn from_epsg(code: u32) -> Self {
        Crs::Epsg(code)
    }

    /// Parse a CRS string.
    ///
    /// Accepts formats like:
    /// - "EPSG:32633"
    /// - "epsg:4326"
    /// - "CRS:84" (equivalent to EPSG:4326)
    pub fn parse(s: &str) -> GeoResult<Self> {
        let normalized = s.trim().to_uppercase();

        if normalized == "CRS:84" {
            return Ok(Crs::Epsg(4326));
        }

        normalized
            .strip_prefix("EPSG:")
            .and_then(|code| code.parse::<u32>().ok())
            .filter(|code| *code > 0)
            .map(Crs::Epsg)
            .ok_or_else(|| GeoError::UnsupportedCrs(s.to_string()))
    }

    pub fn epsg(&self) -> Option<u32> {
        match self {
            Crs::Epsg(code) => Some(*code),
            Crs::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Crs::Epsg(_))
    }

    /// Return the EPSG code, failing for an undefined CRS.
    pub fn require_epsg(&self) -> GeoResult<u32> {
        self.epsg().ok_or(GeoError::UndefinedCrs)
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        self.epsg()
            .map(|code| GEOGRAPHIC_CODES.contains(&code))
            .unwrap_or(false)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{}", code),
            Crs::Undefined => write!(f, "undefined"),
        }
    }
}

impl FromStr for Crs {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crs::parse(s)
    }
}
