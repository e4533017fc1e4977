//! proj4rs-backed transform between two EPSG codes.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use raster_common::Crs;

use crate::epsg::proj_string;
use crate::transform::{CoordinateTransform, ProjectionError};

/// Converts coordinates between two EPSG-coded systems.
///
/// proj4rs works in radians for geographic systems; degrees are converted
/// on the way in and out so callers always see CRS-native units.
pub struct ProjTransform {
    source: Proj,
    target: Proj,
    source_epsg: u32,
    target_epsg: u32,
    source_is_geographic: bool,
    target_is_geographic: bool,
}

impl std::fmt::Debug for ProjTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjTransform")
            .field("source_epsg", &self.source_epsg)
            .field("target_epsg", &self.target_epsg)
            .finish_non_exhaustive()
    }
}

impl ProjTransform {
    /// Create a transform from `source_epsg` coordinates to `target_epsg`.
    pub fn new(source_epsg: u32, target_epsg: u32) -> Result<Self, ProjectionError> {
        Ok(Self {
            source: build_proj(source_epsg)?,
            target: build_proj(target_epsg)?,
            source_epsg,
            target_epsg,
            source_is_geographic: Crs::Epsg(source_epsg).is_geographic(),
            target_is_geographic: Crs::Epsg(target_epsg).is_geographic(),
        })
    }

    pub fn source_epsg(&self) -> u32 {
        self.source_epsg
    }

    pub fn target_epsg(&self) -> u32 {
        self.target_epsg
    }
}

impl CoordinateTransform for ProjTransform {
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let (in_x, in_y) = if self.source_is_geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        let mut point = (in_x, in_y, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| {
            ProjectionError::TransformFailed {
                x,
                y,
                message: format!("{e:?}"),
            }
        })?;

        if self.target_is_geographic {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }
}

fn build_proj(code: u32) -> Result<Proj, ProjectionError> {
    let definition = proj_string(code).ok_or(ProjectionError::UnsupportedEpsg(code))?;
    Proj::from_proj_string(&definition).map_err(|e| ProjectionError::InvalidDefinition {
        code,
        message: format!("{e:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_to_wgs84_central_meridian() {
        // Zone 33 central meridian is 15E; false easting puts it at x = 500 km.
        let t = ProjTransform::new(32633, 4326).unwrap();
        let (lon, lat) = t.transform(500_000.0, 0.0).unwrap();
        assert!((lon - 15.0).abs() < 1e-6, "lon = {lon}");
        assert!(lat.abs() < 1e-6, "lat = {lat}");
    }

    #[test]
    fn test_wgs84_utm_roundtrip() {
        let forward = ProjTransform::new(4326, 32633).unwrap();
        let back = ProjTransform::new(32633, 4326).unwrap();

        let (x, y) = forward.transform(14.5, 45.2).unwrap();
        let (lon, lat) = back.transform(x, y).unwrap();
        assert!((lon - 14.5).abs() < 1e-6);
        assert!((lat - 45.2).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_code() {
        assert_eq!(
            ProjTransform::new(4326, 12345).unwrap_err(),
            ProjectionError::UnsupportedEpsg(12345)
        );
    }
}
