//! Test data generators for creating synthetic rasters.
//!
//! These generators create predictable, verifiable patterns in row-major
//! order that can be used across the test suite.

/// Creates a grid where every cell holds `value`.
///
/// # Example
///
/// ```
/// use test_utils::create_constant_grid;
///
/// let grid = create_constant_grid(4, 4, 1.0);
/// assert_eq!(grid.len(), 16);
/// assert!(grid.iter().all(|&v| v == 1.0));
/// ```
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a linear ramp `start + step * (row * width + col)`.
///
/// Useful as a continuous field whose range is known in advance.
pub fn create_ramp_grid(width: usize, height: usize, start: f64, step: f64) -> Vec<f64> {
    (0..width * height).map(|i| start + step * i as f64).collect()
}

/// Creates a binary inundation-style mask.
///
/// Cells whose column is below `wet_columns` hold `positive`, the rest hold 0.
/// This mimics a flood front advancing from the left edge.
pub fn create_binary_grid(
    width: usize,
    height: usize,
    wet_columns: usize,
    positive: f64,
) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(if col < wet_columns { positive } else { 0.0 });
        }
    }
    data
}

/// Overwrites the cells at `indices` with `nodata`.
///
/// # Panics
///
/// Panics if an index is out of bounds.
pub fn with_nodata(mut data: Vec<f64>, indices: &[usize], nodata: f64) -> Vec<f64> {
    for &i in indices {
        data[i] = nodata;
    }
    data
}
