//! EPSG code to proj-string lookup.
//!
//! proj4rs does not ship an EPSG database, so the handful of systems that
//! flood-model rasters actually use are listed here. UTM zones on WGS84
//! (EPSG:326xx / 327xx) are generated.

/// Return the proj4 definition string for an EPSG code, if known.
pub fn proj_string(code: u32) -> Option<String> {
    let fixed = match code {
        4326 => Some("+proj=longlat +datum=WGS84 +no_defs"),
        4269 => Some("+proj=longlat +ellps=GRS80 +towgs84=0,0,0 +no_defs"),
        4258 => Some("+proj=longlat +ellps=GRS80 +towgs84=0,0,0 +no_defs"),
        3857 => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs",
        ),
        // CONUS Albers Equal Area
        5070 => Some(
            "+proj=aea +lat_0=23 +lon_0=-96 +lat_1=29.5 +lat_2=45.5 +x_0=0 +y_0=0 +ellps=GRS80 +towgs84=0,0,0 +units=m +no_defs",
        ),
        // ETRS89 / LAEA Europe
        3035 => Some(
            "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +towgs84=0,0,0 +units=m +no_defs",
        ),
        3413 => Some(
            "+proj=stere +lat_0=90 +lat_ts=70 +lon_0=-45 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs",
        ),
        3031 => Some(
            "+proj=stere +lat_0=-90 +lat_ts=-71 +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs",
        ),
        _ => None,
    };

    if let Some(def) = fixed {
        return Some(def.to_string());
    }

    utm_wgs84(code)
}

fn utm_wgs84(code: u32) -> Option<String> {
    let (zone, south) = match code {
        32601..=32660 => (code - 32600, false),
        32701..=32760 => (code - 32700, true),
        _ => return None,
    };

    let hemisphere = if south { " +south" } else { "" };
    Some(format!(
        "+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs",
        zone, hemisphere
    ))
}
