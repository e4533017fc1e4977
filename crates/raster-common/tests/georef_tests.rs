//! Georeferencing behaviour across transforms, specs and masks.

use raster_common::{BoundingBox, Crs, GeoError, GeoTransform, Grid, GridSpec, ValidityMask};

// ============================================================================
// Transform tests
// ============================================================================

#[test]
fn test_pixel_area_uses_coefficients_zero_and_four() {
    let t = GeoTransform::new([15.0, 0.0, 0.0, 0.0, -15.0, 0.0]);
    assert_eq!(t.pixel_area(), 225.0);

    // Rotation terms do not enter the pixel area.
    let rotated = GeoTransform::new([10.0, 3.0, 0.0, 2.0, -10.0, 0.0]);
    assert_eq!(rotated.pixel_area(), 100.0);
}

#[test]
fn test_inverse_maps_world_back_to_pixel_centres() {
    let t = GeoTransform::north_up(500_000.0, 4_200_000.0, 30.0, 30.0);
    let inv = t.inverse().unwrap();

    let (x, y) = t.pixel_to_world(2.5, 4.5);
    let (col, row) = inv.pixel_to_world(x, y);
    assert!((col - 2.5).abs() < 1e-9);
    assert!((row - 4.5).abs() < 1e-9);
}

#[test]
fn test_singular_transform_is_invalid() {
    let t = GeoTransform::new([10.0, 10.0, 0.0, 5.0, 5.0, 0.0]);
    assert!(matches!(t.inverse(), Err(GeoError::InvalidTransform { .. })));
}

// ============================================================================
// GridSpec tests
// ============================================================================

#[test]
fn test_coarse_and_fine_specs_share_extent() {
    let fine = GridSpec::new(
        6,
        6,
        GeoTransform::north_up(0.0, 60.0, 10.0, 10.0),
        Crs::Epsg(32633),
    );
    let coarse = GridSpec::new(
        2,
        2,
        GeoTransform::north_up(0.0, 60.0, 30.0, 30.0),
        Crs::Epsg(32633),
    );

    assert_eq!(fine.extent(), coarse.extent());
    assert_eq!(fine.extent(), BoundingBox::new(0.0, 0.0, 60.0, 60.0));
}

#[test]
fn test_spec_serde_roundtrip_keeps_crs() {
    let spec = GridSpec::new(
        3,
        2,
        GeoTransform::north_up(1.0, 2.0, 0.5, 0.5),
        Crs::Epsg(4326),
    );
    let cloned = spec.clone();
    assert_eq!(spec, cloned);
    assert!(cloned.crs.is_geographic());
}

// ============================================================================
// Grid + mask tests
// ============================================================================

#[test]
fn test_joint_mask_from_two_grids() {
    let spec = GridSpec::new(
        2,
        2,
        GeoTransform::north_up(0.0, 20.0, 10.0, 10.0),
        Crs::Epsg(32633),
    );
    let reference = Grid::new(spec.clone(), vec![1.0, -9999.0, 3.0, 4.0], Some(-9999.0)).unwrap();
    let prediction = Grid::new(spec, vec![1.0, 2.0, f64::NAN, 4.0], Some(-9999.0)).unwrap();

    let joint = reference
        .validity_mask()
        .and(&prediction.validity_mask())
        .unwrap();
    assert_eq!(joint.as_slice(), &[true, false, false, true]);
    assert_eq!(joint.count_valid(), 2);
}

#[test]
fn test_mask_length_mismatch() {
    let a = ValidityMask::all_valid(4);
    let b = ValidityMask::all_valid(5);
    assert_eq!(
        a.and(&b),
        Err(GeoError::ShapeMismatch {
            expected: 4,
            actual: 5
        })
    );
}
