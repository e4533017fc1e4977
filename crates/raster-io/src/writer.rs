//! GeoTIFF writing.

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use raster_common::{GeoError, GridSpec};
use tiff::encoder::colortype::{self, ColorType as EncoderColor};
use tiff::encoder::{TiffEncoder, TiffValue};
use tracing::debug;

use crate::error::Result;
use crate::geokeys::{
    self, GeoKeys, GDAL_NODATA, GEO_KEY_DIRECTORY, MODEL_PIXEL_SCALE, MODEL_TIEPOINT,
    MODEL_TRANSFORMATION,
};

/// Samples to write, tagged with their on-disk data type.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterData {
    U8(Vec<u8>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl RasterData {
    pub fn len(&self) -> usize {
        match self {
            RasterData::U8(v) => v.len(),
            RasterData::F32(v) => v.len(),
            RasterData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            RasterData::U8(_) => "uint8",
            RasterData::F32(_) => "float32",
            RasterData::F64(_) => "float64",
        }
    }

    /// Samples widened to f64, as a reader would return them.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            RasterData::U8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            RasterData::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            RasterData::F64(v) => v.clone(),
        }
    }
}

/// Write a single-band GeoTIFF, creating parent directories as needed.
///
/// North-up transforms are stored as PixelScale + Tiepoint; rotated ones
/// as a full ModelTransformation matrix. The CRS goes into the GeoKey
/// directory when it has an EPSG code, and `nodata` into `GDAL_NODATA`.
pub fn write_geotiff(
    path: &Path,
    data: &RasterData,
    spec: &GridSpec,
    nodata: Option<f64>,
) -> Result<()> {
    if data.len() != spec.len() {
        return Err(GeoError::ShapeMismatch {
            expected: spec.len(),
            actual: data.len(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tags = GeoTags::new(spec, nodata);
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;

    match data {
        RasterData::U8(v) => write_band::<colortype::Gray8, _>(&mut encoder, spec, &tags, v)?,
        RasterData::F32(v) => {
            write_band::<colortype::Gray32Float, _>(&mut encoder, spec, &tags, v)?
        }
        RasterData::F64(v) => {
            write_band::<colortype::Gray64Float, _>(&mut encoder, spec, &tags, v)?
        }
    }

    debug!(
        path = %path.display(),
        dtype = data.dtype(),
        width = spec.width,
        height = spec.height,
        "Wrote GeoTIFF"
    );
    Ok(())
}

/// Georeferencing tag payloads, computed once per write.
struct GeoTags {
    pixel_scale: Option<[f64; 3]>,
    tiepoint: Option<[f64; 6]>,
    matrix: Option<[f64; 16]>,
    key_directory: Option<Vec<u16>>,
    nodata: Option<String>,
}

impl GeoTags {
    fn new(spec: &GridSpec, nodata: Option<f64>) -> Self {
        let [a, b, c, d, e, f] = spec.transform.coefficients();
        let (pixel_scale, tiepoint, matrix) = if spec.transform.is_north_up() && e < 0.0 {
            (
                Some([a, -e, 0.0]),
                Some([0.0, 0.0, 0.0, c, f, 0.0]),
                None,
            )
        } else {
            #[rustfmt::skip]
            let m = [
                a, b, 0.0, c,
                d, e, 0.0, f,
                0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ];
            (None, None, Some(m))
        };

        Self {
            pixel_scale,
            tiepoint,
            matrix,
            key_directory: GeoKeys::directory_for(&spec.crs),
            nodata: nodata.map(geokeys::format_nodata),
        }
    }
}

fn write_band<C, W>(
    encoder: &mut TiffEncoder<W>,
    spec: &GridSpec,
    tags: &GeoTags,
    samples: &[C::Inner],
) -> Result<()>
where
    C: EncoderColor,
    W: Write + Seek,
    [C::Inner]: TiffValue,
{
    let mut image = encoder.new_image::<C>(spec.width as u32, spec.height as u32)?;

    let dir = image.encoder();
    if let Some(scale) = &tags.pixel_scale {
        dir.write_tag(geokeys::tag(MODEL_PIXEL_SCALE), &scale[..])?;
    }
    if let Some(tiepoint) = &tags.tiepoint {
        dir.write_tag(geokeys::tag(MODEL_TIEPOINT), &tiepoint[..])?;
    }
    if let Some(matrix) = &tags.matrix {
        dir.write_tag(geokeys::tag(MODEL_TRANSFORMATION), &matrix[..])?;
    }
    if let Some(keys) = &tags.key_directory {
        dir.write_tag(geokeys::tag(GEO_KEY_DIRECTORY), &keys[..])?;
    }
    if let Some(nodata) = &tags.nodata {
        dir.write_tag(geokeys::tag(GDAL_NODATA), nodata.as_str())?;
    }

    image.write_data(samples)?;
    Ok(())
}
