//! Sampling kernels for grid resampling.
//!
//! Positions are fractional pixel coordinates in the source grid using the
//! pixel-edge convention: pixel `(col, row)` covers `[col, col + 1) x
//! [row, row + 1)`, so its centre sits at `(col + 0.5, row + 0.5)`.
//! A kernel returns `None` where the output should be nodata.

#[inline]
fn is_valid(value: f64, nodata: Option<f64>) -> bool {
    value.is_finite() && nodata.map_or(true, |nd| value != nd)
}

#[inline]
fn inside(width: usize, height: usize, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64
}

/// Nearest neighbor interpolation.
///
/// Returns the value of the source cell containing `(x, y)`, or `None`
/// when the point is off the grid or the cell is nodata.
pub fn nearest_interpolate(
    data: &[f64],
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    nodata: Option<f64>,
) -> Option<f64> {
    if !inside(width, height, x, y) {
        return None;
    }

    let col = x.floor() as usize;
    let row = y.floor() as usize;
    let value = data[row * width + col];

    is_valid(value, nodata).then_some(value)
}

/// Bilinear interpolation.
///
/// Interpolates between the four cell centres surrounding `(x, y)`, clamping
/// at the grid edges. Any neighbour with a non-zero weight that is nodata
/// (or NaN) makes the result `None`.
pub fn bilinear_interpolate(
    data: &[f64],
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    nodata: Option<f64>,
) -> Option<f64> {
    if !inside(width, height, x, y) {
        return None;
    }

    // Shift to cell-centre coordinates.
    let cx = x - 0.5;
    let cy = y - 0.5;

    let max_col = width as i64 - 1;
    let max_row = height as i64 - 1;
    let x0 = (cx.floor() as i64).clamp(0, max_col);
    let y0 = (cy.floor() as i64).clamp(0, max_row);
    let x1 = (x0 + 1).min(max_col);
    let y1 = (y0 + 1).min(max_row);

    let xf = (cx - x0 as f64).clamp(0.0, 1.0);
    let yf = (cy - y0 as f64).clamp(0.0, 1.0);

    let at = |col: i64, row: i64| data[row as usize * width + col as usize];
    let corners = [
        (at(x0, y0), (1.0 - xf) * (1.0 - yf)),
        (at(x1, y0), xf * (1.0 - yf)),
        (at(x0, y1), (1.0 - xf) * yf),
        (at(x1, y1), xf * yf),
    ];

    let mut sum = 0.0;
    for (value, weight) in corners {
        if weight == 0.0 {
            continue;
        }
        if !is_valid(value, nodata) {
            return None;
        }
        sum += value * weight;
    }
    Some(sum)
}
