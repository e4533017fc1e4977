//! End-to-end comparison tests: align a coarse prediction onto a fine
//! reference, then classify or compute NRMSE.

use grid_processor::{
    align, classify, compute_grid_nrmse, compute_nrmse, ConfusionStatistics, GridProcessorError,
    Normalization, ResamplingKernel,
};
use raster_common::ValidityMask;
use test_utils::{
    assert_approx_eq, create_binary_grid, create_constant_grid, create_ramp_grid, utm_grid,
    utm_spec, wgs84_spec, grid, with_nodata,
};

const DST_NODATA: f64 = -9999.0;

// =============================================================================
// Classification Scenarios
// =============================================================================

#[test]
fn test_scenario_all_positive_agreement() {
    let reference = utm_grid(4, 4, 10.0, create_constant_grid(4, 4, 1.0), Some(255.0));
    let prediction = utm_grid(2, 2, 20.0, create_constant_grid(2, 2, 1.0), None);

    let aligned = align(
        &prediction,
        reference.spec(),
        ResamplingKernel::Nearest,
        None,
        DST_NODATA,
    )
    .unwrap();
    let result = classify(reference.data(), aligned.data(), 1.0, 255).unwrap();
    let stats = ConfusionStatistics::new("prediction_20m", result.counts, reference.spec().pixel_area());

    assert_eq!(result.counts.true_positives, 16);
    assert_eq!(result.counts.false_negatives, 0);
    assert_eq!(result.counts.false_positives, 0);
    assert_eq!(stats.tp_percent, 100.0);
    assert_eq!(stats.tp_area, 1600.0);
    assert!(result.labels.iter().all(|&l| l == 1));
}

#[test]
fn test_scenario_all_missed() {
    let reference = utm_grid(4, 4, 10.0, create_constant_grid(4, 4, 1.0), None);
    let prediction = utm_grid(2, 2, 20.0, create_constant_grid(2, 2, 0.0), None);

    let aligned = align(
        &prediction,
        reference.spec(),
        ResamplingKernel::Nearest,
        None,
        DST_NODATA,
    )
    .unwrap();
    let result = classify(reference.data(), aligned.data(), 1.0, 255).unwrap();
    let stats = ConfusionStatistics::new("prediction_20m", result.counts, 100.0);

    assert_eq!(result.counts.false_negatives, 16);
    assert_eq!(stats.tp_percent, 0.0);
    assert_eq!(stats.fn_percent, 100.0);
    assert!(result.labels.iter().all(|&l| l == 2));
}

#[test]
fn test_coarse_prediction_overshoots_flood_front() {
    // Reference: left 2 of 6 columns wet. Prediction at 30 m: left coarse column wet,
    // which covers the left 3 fine columns.
    let reference = utm_grid(6, 6, 10.0, create_binary_grid(6, 6, 2, 1.0), None);
    let prediction = utm_grid(2, 2, 30.0, create_binary_grid(2, 2, 1, 1.0), None);

    let aligned = align(
        &prediction,
        reference.spec(),
        ResamplingKernel::Nearest,
        None,
        DST_NODATA,
    )
    .unwrap();
    let result = classify(reference.data(), aligned.data(), 1.0, 255).unwrap();

    assert_eq!(result.counts.true_positives, 12);
    assert_eq!(result.counts.false_negatives, 0);
    assert_eq!(result.counts.false_positives, 6);
    assert_eq!(result.counts.reference_positives, 12);
    assert_eq!(&result.labels[..6], &[1, 1, 3, 255, 255, 255]);

    let stats = ConfusionStatistics::new("prediction_30m", result.counts, 100.0);
    assert_eq!(stats.fp_area, 600.0);
    assert_eq!(stats.fp_percent, 50.0);
}

#[test]
fn test_prediction_outside_coverage_counts_as_missed() {
    // Prediction covers only the top half of the reference.
    let reference = utm_grid(4, 4, 10.0, create_constant_grid(4, 4, 1.0), None);
    let prediction = utm_grid(2, 1, 20.0, create_constant_grid(2, 1, 1.0), None);

    let aligned = align(
        &prediction,
        reference.spec(),
        ResamplingKernel::Nearest,
        None,
        DST_NODATA,
    )
    .unwrap();
    let result = classify(reference.data(), aligned.data(), 1.0, 255).unwrap();

    assert_eq!(result.counts.true_positives, 8);
    assert_eq!(result.counts.false_negatives, 8);
}

#[test]
fn test_tp_plus_fn_equals_reference_positives() {
    let reference = utm_grid(6, 6, 10.0, create_binary_grid(6, 6, 4, 1.0), None);
    let expected_positives = reference.count_equal(1.0);

    for (pixel, wet) in [(15.0, 1), (20.0, 2), (30.0, 0)] {
        let n = (60.0 / pixel) as usize;
        let prediction = utm_grid(n, n, pixel, create_binary_grid(n, n, wet, 1.0), None);
        let aligned = align(
            &prediction,
            reference.spec(),
            ResamplingKernel::Nearest,
            None,
            DST_NODATA,
        )
        .unwrap();
        let counts = classify(reference.data(), aligned.data(), 1.0, 255)
            .unwrap()
            .counts;

        assert_eq!(counts.true_positives + counts.false_negatives, expected_positives);
        assert_eq!(counts.reference_positives, expected_positives);

        let stats = ConfusionStatistics::new("p", counts, 100.0);
        for pct in [stats.tp_percent, stats.fn_percent] {
            assert!((0.0..=100.0).contains(&pct), "percentage out of range: {}", pct);
        }
        assert_eq!(stats.tp_area, counts.true_positives as f64 * 100.0);
        assert_eq!(stats.fn_area, counts.false_negatives as f64 * 100.0);
    }
}

// =============================================================================
// NRMSE Scenarios
// =============================================================================

#[test]
fn test_scenario_single_pixel_error() {
    // 16 samples with range 100; one pixel off by 10.
    let reference_data = {
        let mut d = create_constant_grid(4, 4, 50.0);
        d[0] = 0.0;
        d[15] = 100.0;
        d
    };
    let mut prediction_data = reference_data.clone();
    prediction_data[5] += 10.0;

    let reference = utm_grid(4, 4, 10.0, reference_data, None);
    let prediction = utm_grid(4, 4, 10.0, prediction_data, Some(DST_NODATA));

    let result = compute_grid_nrmse(&reference, &prediction, Normalization::Range).unwrap();
    assert_approx_eq!(result.rmse, 2.5, 1e-12);
    assert_eq!(result.factor, 100.0);
    assert_approx_eq!(result.nrmse_percent, 2.5, 1e-12);
    assert_eq!(result.valid_pixels, 16);
}

#[test]
fn test_scenario_invalid_normalization_name() {
    let err = "invalid".parse::<Normalization>().unwrap_err();
    assert!(matches!(err, GridProcessorError::Configuration(_)));
}

#[test]
fn test_scenario_constant_reference_is_degenerate() {
    let reference = utm_grid(4, 4, 10.0, create_constant_grid(4, 4, 2.0), None);
    let prediction = utm_grid(4, 4, 10.0, create_ramp_grid(4, 4, 0.0, 1.0), None);

    let err = compute_grid_nrmse(&reference, &prediction, Normalization::Range).unwrap_err();
    assert!(matches!(
        err,
        GridProcessorError::DegenerateNormalization { factor, .. } if factor == 0.0
    ));
}

#[test]
fn test_bilinear_aligned_identity_gives_zero() {
    let reference = utm_grid(4, 4, 8.0, create_ramp_grid(4, 4, 1.0, 0.25), Some(DST_NODATA));
    let aligned = align(
        &reference,
        reference.spec(),
        ResamplingKernel::Bilinear,
        Some(DST_NODATA),
        DST_NODATA,
    )
    .unwrap();

    for method in [Normalization::Range, Normalization::Mean, Normalization::Std] {
        let result = compute_grid_nrmse(&reference, &aligned, method).unwrap();
        assert_eq!(result.nrmse_percent, 0.0);
    }
}

#[test]
fn test_nrmse_is_non_negative_with_nodata() {
    let reference = utm_grid(
        4,
        4,
        10.0,
        with_nodata(create_ramp_grid(4, 4, -5.0, 1.0), &[3, 7], DST_NODATA),
        Some(DST_NODATA),
    );
    let prediction = utm_grid(2, 2, 20.0, vec![-4.0, 0.0, 3.0, 9.0], None);

    let aligned = align(
        &prediction,
        reference.spec(),
        ResamplingKernel::Bilinear,
        None,
        DST_NODATA,
    )
    .unwrap();

    for method in [Normalization::Range, Normalization::Mean, Normalization::Std] {
        let result = compute_grid_nrmse(&reference, &aligned, method).unwrap();
        assert!(result.nrmse_percent >= 0.0, "{} gave {}", method, result.nrmse_percent);
        assert!(result.valid_pixels <= 14);
    }
}

#[test]
fn test_disjoint_masks_are_insufficient_data() {
    let data = create_constant_grid(2, 2, 1.0);
    let reference_mask = ValidityMask::from_vec(vec![true, true, false, false]);
    let prediction_mask = ValidityMask::from_vec(vec![false, false, true, true]);

    let err = compute_nrmse(&data, &reference_mask, &data, &prediction_mask, Normalization::Mean)
        .unwrap_err();
    assert!(matches!(err, GridProcessorError::InsufficientData(_)));
}

// =============================================================================
// Cross-CRS Alignment
// =============================================================================

#[test]
fn test_align_geographic_prediction_onto_utm_reference() {
    // A 2x2 degree geographic tile around 15E, 36N fully covers the small UTM grid.
    let prediction = grid(
        wgs84_spec(4, 4, 14.0, 37.0, 0.5),
        create_constant_grid(4, 4, 7.0),
        None,
    );
    let target = utm_spec(3, 3, 10.0);

    let aligned = align(&prediction, &target, ResamplingKernel::Nearest, None, DST_NODATA).unwrap();
    assert_eq!(aligned.data(), create_constant_grid(3, 3, 7.0).as_slice());
}
