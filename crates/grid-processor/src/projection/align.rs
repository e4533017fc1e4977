//! Grid alignment: resample a source grid onto a target grid's geometry.

use projection::transformer_between;
use raster_common::{Grid, GridSpec};
use tracing::{debug, warn};

use super::{bilinear_interpolate, nearest_interpolate};
use crate::error::Result;
use crate::types::ResamplingKernel;

/// Resample `source` onto the pixel grid described by `target`.
///
/// For every target pixel the centre is mapped into world coordinates,
/// converted from the target CRS into the source CRS, and then into
/// fractional source pixel space through the inverse source transform. The
/// source is sampled there with `kernel`.
///
/// # Arguments
/// * `source` - Grid to resample
/// * `target` - Shape, transform and CRS of the output
/// * `kernel` - Nearest (categorical) or bilinear (continuous)
/// * `src_nodata` - Source sentinel treated as missing (NaN always is)
/// * `dst_nodata` - Value written where no valid sample exists
///
/// # Returns
/// A grid with `target`'s shape whose nodata is `dst_nodata`. Pixels that
/// map outside source coverage, onto source nodata, or (bilinear) next to
/// source nodata hold `dst_nodata`.
///
/// # Errors
/// Configuration errors for empty grids, non-invertible transforms or
/// undefined CRSs; Projection errors when no CRS conversion exists.
pub fn align(
    source: &Grid,
    target: &GridSpec,
    kernel: ResamplingKernel,
    src_nodata: Option<f64>,
    dst_nodata: f64,
) -> Result<Grid> {
    let source_spec = source.spec();
    source_spec.validate()?;
    target.validate()?;

    let inverse = source_spec.transform.inverse()?;
    let to_source_crs = transformer_between(&target.crs, &source_spec.crs)?;

    if to_source_crs.is_identity() && !target.extent().intersects(&source_spec.extent()) {
        warn!(
            source_crs = %source_spec.crs,
            "Target grid does not overlap source coverage; output will be all nodata"
        );
    }

    let (src_w, src_h) = (source_spec.width, source_spec.height);
    let src_data = source.data();

    let mut output = vec![dst_nodata; target.len()];
    let mut invalid = 0usize;
    let mut transform_failures = 0usize;

    for row in 0..target.height {
        for col in 0..target.width {
            let (x, y) = target.pixel_center(col, row);

            let (sx, sy) = match to_source_crs.transform(x, y) {
                Ok(point) => point,
                Err(_) => {
                    transform_failures += 1;
                    invalid += 1;
                    continue;
                }
            };
            let (px, py) = inverse.pixel_to_world(sx, sy);

            let sample = match kernel {
                ResamplingKernel::Nearest => {
                    nearest_interpolate(src_data, src_w, src_h, px, py, src_nodata)
                }
                ResamplingKernel::Bilinear => {
                    bilinear_interpolate(src_data, src_w, src_h, px, py, src_nodata)
                }
            };

            match sample {
                Some(value) => output[row * target.width + col] = value,
                None => invalid += 1,
            }
        }
    }

    debug!(
        kernel = %kernel,
        src_shape = ?(src_w, src_h),
        dst_shape = ?(target.width, target.height),
        invalid,
        transform_failures,
        "Aligned grid"
    );

    Ok(Grid::new(target.clone(), output, Some(dst_nodata))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridProcessorError;
    use raster_common::{Crs, GeoTransform};

    fn spec(width: usize, height: usize, pixel: f64) -> GridSpec {
        GridSpec::new(
            width,
            height,
            GeoTransform::north_up(0.0, height as f64 * pixel, pixel, pixel),
            Crs::Epsg(32633),
        )
    }

    #[test]
    fn test_align_onto_own_grid_is_identity() {
        let data: Vec<f64> = (0..12).map(|i| i as f64 * 1.5).collect();
        let source = Grid::new(spec(4, 3, 8.0), data.clone(), None).unwrap();

        for kernel in [ResamplingKernel::Nearest, ResamplingKernel::Bilinear] {
            let aligned = align(&source, source.spec(), kernel, None, -9999.0).unwrap();
            assert_eq!(aligned.data(), data.as_slice(), "kernel {kernel}");
        }
    }

    #[test]
    fn test_nearest_upsamples_coarse_blocks() {
        // 2x2 coarse grid at 30 m onto a 6x6 fine grid at 10 m.
        let coarse = Grid::new(spec(2, 2, 30.0), vec![1.0, 2.0, 3.0, 4.0], None).unwrap();
        let aligned = align(&coarse, &spec(6, 6, 10.0), ResamplingKernel::Nearest, None, -9999.0)
            .unwrap();

        assert_eq!(aligned.get(0, 0), Some(1.0));
        assert_eq!(aligned.get(2, 2), Some(1.0));
        assert_eq!(aligned.get(3, 0), Some(2.0));
        assert_eq!(aligned.get(0, 5), Some(3.0));
        assert_eq!(aligned.get(5, 5), Some(4.0));
        assert_eq!(aligned.validity_mask().count_valid(), 36);
    }

    #[test]
    fn test_outside_coverage_filled_with_dst_nodata() {
        // Source covers only the left half of the target.
        let source = Grid::new(
            GridSpec::new(
                1,
                2,
                GeoTransform::north_up(0.0, 20.0, 10.0, 10.0),
                Crs::Epsg(32633),
            ),
            vec![5.0, 6.0],
            None,
        )
        .unwrap();
        let aligned = align(&source, &spec(2, 2, 10.0), ResamplingKernel::Nearest, None, -9999.0)
            .unwrap();

        assert_eq!(aligned.data(), &[5.0, -9999.0, 6.0, -9999.0]);
        assert_eq!(aligned.nodata(), Some(-9999.0));
        assert_eq!(aligned.validity_mask().count_valid(), 2);
    }

    #[test]
    fn test_bilinear_propagates_source_nodata() {
        let source = Grid::new(
            spec(2, 2, 20.0),
            vec![1.0, 255.0, 3.0, 4.0],
            Some(255.0),
        )
        .unwrap();
        let aligned = align(
            &source,
            &spec(4, 4, 10.0),
            ResamplingKernel::Bilinear,
            Some(255.0),
            -9999.0,
        )
        .unwrap();

        // Fine pixel in the top-left corner only sees the valid cell.
        assert_eq!(aligned.get(0, 0), Some(1.0));
        // Interior pixels blend with the nodata cell and become invalid.
        assert_eq!(aligned.get(1, 1), Some(-9999.0));
        assert_eq!(aligned.get(3, 0), Some(-9999.0));
    }

    #[test]
    fn test_undefined_crs_is_configuration_error() {
        let mut bad = spec(2, 2, 10.0);
        bad.crs = Crs::Undefined;
        let source = Grid::new(bad, vec![0.0; 4], None).unwrap();

        let err = align(&source, &spec(2, 2, 10.0), ResamplingKernel::Nearest, None, -9999.0)
            .unwrap_err();
        assert!(matches!(err, GridProcessorError::Configuration(_)));
    }

    #[test]
    fn test_zero_area_target_is_configuration_error() {
        let source = Grid::new(spec(2, 2, 10.0), vec![0.0; 4], None).unwrap();
        let target = GridSpec::new(
            2,
            2,
            GeoTransform::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            Crs::Epsg(32633),
        );

        let err = align(&source, &target, ResamplingKernel::Nearest, None, -9999.0).unwrap_err();
        assert!(matches!(err, GridProcessorError::Configuration(_)));
    }
}
