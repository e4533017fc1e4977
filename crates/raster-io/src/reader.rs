//! GeoTIFF reading.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use raster_common::{Crs, GeoTransform, Grid, GridSpec};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;
use tracing::debug;

use crate::error::{RasterIoError, Result};
use crate::geokeys::{
    self, GeoKeys, GDAL_NODATA, GEO_KEY_DIRECTORY, MODEL_PIXEL_SCALE, MODEL_TIEPOINT,
    MODEL_TRANSFORMATION,
};

/// Read the first band of a single-band GeoTIFF.
///
/// Samples are widened to f64. The returned grid carries the affine
/// transform, the EPSG code (or [`Crs::Undefined`]) and the GDAL nodata
/// sentinel when one is declared.
///
/// # Errors
/// * [`RasterIoError::NotFound`] if `path` does not exist
/// * [`RasterIoError::UnsupportedLayout`] for multi-band or colour images
/// * [`RasterIoError::MissingGeoreference`] when no transform tags exist
pub fn read_geotiff(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(RasterIoError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited());

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(RasterIoError::UnsupportedLayout(format!(
                "{:?} in {}",
                other,
                path.display()
            )))
        }
    }

    let (width, height) = decoder.dimensions()?;
    let keys = read_geokeys(&mut decoder)?;
    let transform = read_transform(&mut decoder, &keys, path)?;
    let mut nodata = read_nodata(&mut decoder)?;
    let samples = decoder.read_image()?;
    if matches!(samples, DecodingResult::F32(_)) {
        // Nodata is matched at the precision of the samples.
        nodata = nodata.map(|v| f64::from(v as f32));
    }
    let data = widen(samples)?;

    let crs = keys.map(|k| k.crs()).unwrap_or(Crs::Undefined);
    debug!(
        path = %path.display(),
        width,
        height,
        crs = %crs,
        nodata = ?nodata,
        "Read GeoTIFF"
    );

    let spec = GridSpec::new(width as usize, height as usize, transform, crs);
    Ok(Grid::new(spec, data, nodata)?)
}

fn read_geokeys<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<GeoKeys>> {
    match decoder.find_tag(geokeys::tag(GEO_KEY_DIRECTORY))? {
        Some(value) => Ok(Some(GeoKeys::parse(&value.into_u16_vec()?)?)),
        None => Ok(None),
    }
}

fn read_transform<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    keys: &Option<GeoKeys>,
    path: &Path,
) -> Result<GeoTransform> {
    let transform = if let Some(matrix) = decoder.find_tag(geokeys::tag(MODEL_TRANSFORMATION))? {
        geokeys::transform_from_matrix(&matrix.into_f64_vec()?)?
    } else {
        let scale = decoder.find_tag(geokeys::tag(MODEL_PIXEL_SCALE))?;
        let tiepoint = decoder.find_tag(geokeys::tag(MODEL_TIEPOINT))?;
        match (scale, tiepoint) {
            (Some(scale), Some(tiepoint)) => geokeys::transform_from_tiepoint(
                &scale.into_f64_vec()?,
                &tiepoint.into_f64_vec()?,
            )?,
            _ => return Err(RasterIoError::MissingGeoreference(path.to_path_buf())),
        }
    };

    if keys.map_or(false, |k| k.is_pixel_is_point()) {
        Ok(geokeys::shift_pixel_is_point(transform))
    } else {
        Ok(transform)
    }
}

fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<f64>> {
    match decoder.find_tag(geokeys::tag(GDAL_NODATA))? {
        Some(value) => Ok(geokeys::parse_nodata(&value.into_string()?)),
        None => Ok(None),
    }
}

fn widen(result: DecodingResult) -> Result<Vec<f64>> {
    let data = match result {
        DecodingResult::U8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F64(buf) => buf,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(RasterIoError::UnsupportedPixelFormat(
                "64-bit integer samples".to_string(),
            ))
        }
    };
    Ok(data)
}
