//! Common georeference fixtures.
//!
//! All projected fixtures sit in UTM zone 33N so pixel sizes are metres and
//! pixel areas are easy to check by hand.

use raster_common::{Crs, GeoTransform, Grid, GridSpec};

/// EPSG code of the projected fixtures (WGS 84 / UTM zone 33N).
pub const UTM_33N: u32 = 32633;

/// Upper-left corner shared by all projected fixtures.
pub const ORIGIN: (f64, f64) = (500_000.0, 4_000_000.0);

/// North-up UTM grid anchored at [`ORIGIN`] with square pixels.
///
/// Grids built with the same origin and `width * pixel_size` cover the same
/// extent, which is how reference and coarser predictions are laid out.
pub fn utm_spec(width: usize, height: usize, pixel_size: f64) -> GridSpec {
    GridSpec::new(
        width,
        height,
        GeoTransform::north_up(ORIGIN.0, ORIGIN.1, pixel_size, pixel_size),
        Crs::Epsg(UTM_33N),
    )
}

/// Geographic (EPSG:4326) grid with its upper-left corner at `(lon, lat)`.
pub fn wgs84_spec(width: usize, height: usize, lon: f64, lat: f64, degrees: f64) -> GridSpec {
    GridSpec::new(
        width,
        height,
        GeoTransform::north_up(lon, lat, degrees, degrees),
        Crs::Epsg(4326),
    )
}

/// Builds a [`Grid`], panicking on a shape mismatch.
pub fn grid(spec: GridSpec, data: Vec<f64>, nodata: Option<f64>) -> Grid {
    Grid::new(spec, data, nodata).expect("fixture data must match the grid shape")
}

/// A UTM grid filled from `data` at the given pixel size.
///
/// # Panics
///
/// Panics if `data.len() != width * height`.
pub fn utm_grid(
    width: usize,
    height: usize,
    pixel_size: f64,
    data: Vec<f64>,
    nodata: Option<f64>,
) -> Grid {
    grid(utm_spec(width, height, pixel_size), data, nodata)
}
