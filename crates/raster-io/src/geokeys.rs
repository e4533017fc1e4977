//! GeoTIFF tag and GeoKey handling.
//!
//! Reference: OGC GeoTIFF 1.1. Only the keys needed to recover an affine
//! transform, an EPSG code and the raster-space convention are interpreted.

use raster_common::{Crs, GeoTransform};
use tiff::tags::Tag;

use crate::error::{RasterIoError, Result};

pub const MODEL_PIXEL_SCALE: u16 = 33550;
pub const MODEL_TIEPOINT: u16 = 33922;
pub const MODEL_TRANSFORMATION: u16 = 34264;
pub const GEO_KEY_DIRECTORY: u16 = 34735;
pub const GDAL_NODATA: u16 = 42113;

const GT_MODEL_TYPE_KEY: u16 = 1024;
const GT_RASTER_TYPE_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_KEY: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;
const RASTER_PIXEL_IS_POINT: u16 = 2;
const USER_DEFINED: u16 = 32767;

/// Resolve a numeric tag code to the decoder's canonical `Tag` value.
pub fn tag(code: u16) -> Tag {
    Tag::from_u16_exhaustive(code)
}

/// The subset of the GeoKey directory we care about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoKeys {
    pub model_type: Option<u16>,
    pub raster_type: Option<u16>,
    pub geographic_type: Option<u16>,
    pub projected_type: Option<u16>,
}

impl GeoKeys {
    /// Parse a `GeoKeyDirectoryTag` SHORT array.
    ///
    /// Keys stored out-of-line (in the double/ascii param tags) are ignored.
    pub fn parse(directory: &[u16]) -> Result<Self> {
        if directory.len() < 4 {
            return Err(RasterIoError::InvalidMetadata(format!(
                "GeoKey directory too short ({} entries)",
                directory.len()
            )));
        }

        let count = directory[3] as usize;
        let entries = &directory[4..];
        if entries.len() < count * 4 {
            return Err(RasterIoError::InvalidMetadata(format!(
                "GeoKey directory declares {} keys but holds {}",
                count,
                entries.len() / 4
            )));
        }

        let mut keys = GeoKeys::default();
        for entry in entries.chunks_exact(4).take(count) {
            let (key_id, location, value) = (entry[0], entry[1], entry[3]);
            if location != 0 {
                continue;
            }
            match key_id {
                GT_MODEL_TYPE_KEY => keys.model_type = Some(value),
                GT_RASTER_TYPE_KEY => keys.raster_type = Some(value),
                GEOGRAPHIC_TYPE_KEY => keys.geographic_type = Some(value),
                PROJECTED_CS_TYPE_KEY => keys.projected_type = Some(value),
                _ => {}
            }
        }
        Ok(keys)
    }

    /// CRS declared by the keys; user-defined systems count as undefined.
    pub fn crs(&self) -> Crs {
        self.projected_type
            .or(self.geographic_type)
            .filter(|code| *code != 0 && *code != USER_DEFINED)
            .map(|code| Crs::Epsg(code as u32))
            .unwrap_or(Crs::Undefined)
    }

    pub fn is_pixel_is_point(&self) -> bool {
        self.raster_type == Some(RASTER_PIXEL_IS_POINT)
    }

    /// Build the directory for an EPSG-coded CRS (PixelIsArea).
    pub fn directory_for(crs: &Crs) -> Option<Vec<u16>> {
        let code = u16::try_from(crs.epsg()?).ok()?;
        let (model_type, crs_key) = if crs.is_geographic() {
            (MODEL_TYPE_GEOGRAPHIC, GEOGRAPHIC_TYPE_KEY)
        } else {
            (MODEL_TYPE_PROJECTED, PROJECTED_CS_TYPE_KEY)
        };

        Some(vec![
            1, 1, 0, 3, // version 1.1.0, three keys
            GT_MODEL_TYPE_KEY, 0, 1, model_type,
            GT_RASTER_TYPE_KEY, 0, 1, RASTER_PIXEL_IS_AREA,
            crs_key, 0, 1, code,
        ])
    }
}

/// Affine transform from a 4x4 `ModelTransformationTag` matrix.
pub fn transform_from_matrix(matrix: &[f64]) -> Result<GeoTransform> {
    if matrix.len() < 16 {
        return Err(RasterIoError::InvalidMetadata(format!(
            "ModelTransformation has {} values, expected 16",
            matrix.len()
        )));
    }
    Ok(GeoTransform::new([
        matrix[0], matrix[1], matrix[3], matrix[4], matrix[5], matrix[7],
    ]))
}

/// North-up affine transform from `ModelPixelScale` + first `ModelTiepoint`.
pub fn transform_from_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Result<GeoTransform> {
    if scale.len() < 2 || tiepoint.len() < 6 {
        return Err(RasterIoError::InvalidMetadata(format!(
            "PixelScale/Tiepoint too short ({} / {} values)",
            scale.len(),
            tiepoint.len()
        )));
    }

    let (sx, sy) = (scale[0], scale[1]);
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
    Ok(GeoTransform::new([sx, 0.0, x - i * sx, 0.0, -sy, y + j * sy]))
}

/// Move a PixelIsPoint origin to the corner of the first pixel.
pub fn shift_pixel_is_point(transform: GeoTransform) -> GeoTransform {
    let [a, b, c, d, e, f] = transform.coefficients();
    GeoTransform::new([a, b, c - 0.5 * (a + b), d, e, f - 0.5 * (d + e)])
}

/// Format a nodata sentinel the way GDAL stores it.
pub fn format_nodata(nodata: f64) -> String {
    if nodata.is_nan() {
        "nan".to_string()
    } else {
        format!("{}", nodata)
    }
}

/// Parse a `GDAL_NODATA` ASCII value.
pub fn parse_nodata(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(char::from(0)).trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_roundtrip() {
        let dir = GeoKeys::directory_for(&Crs::Epsg(32633)).unwrap();
        let keys = GeoKeys::parse(&dir).unwrap();
        assert_eq!(keys.crs(), Crs::Epsg(32633));
        assert_eq!(keys.model_type, Some(MODEL_TYPE_PROJECTED));
        assert!(!keys.is_pixel_is_point());

        let geo = GeoKeys::parse(&GeoKeys::directory_for(&Crs::Epsg(4326)).unwrap()).unwrap();
        assert_eq!(geo.geographic_type, Some(4326));
        assert_eq!(geo.crs(), Crs::Epsg(4326));
    }

    #[test]
    fn test_user_defined_crs_is_undefined() {
        let dir = [1, 1, 0, 1, PROJECTED_CS_TYPE_KEY, 0, 1, USER_DEFINED];
        assert_eq!(GeoKeys::parse(&dir).unwrap().crs(), Crs::Undefined);
    }

    #[test]
    fn test_truncated_directory() {
        assert!(GeoKeys::parse(&[1, 1, 0]).is_err());
        assert!(GeoKeys::parse(&[1, 1, 0, 2, 1024, 0, 1, 1]).is_err());
    }

    #[test]
    fn test_tiepoint_transform() {
        let t = transform_from_tiepoint(&[10.0, 10.0, 0.0], &[0.0, 0.0, 0.0, 500.0, 900.0, 0.0])
            .unwrap();
        assert_eq!(t.coefficients(), [10.0, 0.0, 500.0, 0.0, -10.0, 900.0]);
    }

    #[test]
    fn test_pixel_is_point_shift() {
        let t = shift_pixel_is_point(GeoTransform::north_up(100.0, 200.0, 10.0, 10.0));
        assert_eq!(t.coefficients(), [10.0, 0.0, 95.0, 0.0, -10.0, 205.0]);
    }

    #[test]
    fn test_nodata_formatting() {
        assert_eq!(format_nodata(255.0), "255");
        assert_eq!(format_nodata(-9999.0), "-9999");
        assert_eq!(parse_nodata("-9999\0"), Some(-9999.0));
        assert_eq!(parse_nodata(" 255 "), Some(255.0));
        assert!(parse_nodata("nan").unwrap().is_nan());
        assert_eq!(parse_nodata("none"), None);
    }
}
