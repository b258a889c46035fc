//! Parallels, meridians and the fixed coastline, all in radians.

use crate::geo::{GeoPoint, Line};

/// Longitude span covered by every parallel, in degrees.
pub const PARALLEL_SPAN_DEG: (f64, f64) = (0.0, 60.0);

/// Spacing of generated graticule lines, in degrees.
pub const GRATICULE_STEP_DEG: i32 = 10;

fn lerp(k: f64, a: f64, b: f64) -> f64 {
    k * (b - a) + a
}

/// A parallel at `latitude_deg` from longitude 0° to 60°.
///
/// The line has `90 - |latitude_deg|` segments, so shorter lines near the poles.
/// At ±90° it degenerates to a single point.
pub fn parallel(latitude_deg: f64) -> Line {
    let length = 90.0 - latitude_deg.abs();
    let latitude = latitude_deg.to_radians();
    if length <= 0.0 {
        return vec![GeoPoint::new(latitude, PARALLEL_SPAN_DEG.0.to_radians())];
    }

    let steps = length.floor() as usize;
    (0..=steps)
        .map(|i| {
            let lon = lerp(i as f64 / length, PARALLEL_SPAN_DEG.0, PARALLEL_SPAN_DEG.1);
            GeoPoint::new(latitude, lon.to_radians())
        })
        .collect()
}

/// A meridian at `longitude_deg` from 90°S up to 39°N in 5° steps.
pub fn meridian(longitude_deg: f64) -> Line {
    let longitude = longitude_deg.to_radians();
    (-90..=39)
        .step_by(5)
        .map(|lat| GeoPoint::new((lat as f64).to_radians(), longitude))
        .collect()
}

/// The full graticule: parallels at -89°, -79°, … 71° then meridians at 0°, 10°, … 60°.
pub fn graticule() -> Vec<Line> {
    let parallels = (-89..=71)
        .step_by(GRATICULE_STEP_DEG as usize)
        .map(|lat| parallel(lat as f64));
    let meridians = (0..=60)
        .step_by(GRATICULE_STEP_DEG as usize)
        .map(|lon| meridian(lon as f64));
    parallels.chain(meridians).collect()
}

/// (latitude, longitude) in degrees, closed: the last point repeats the first.
const COAST_DEG: [(f64, f64); 12] = [
    (47.116623, 51.026532),
    (46.843689, 52.142414),
    (46.227719, 53.281371),
    (45.397448, 51.986222),
    (43.892946, 51.044532),
    (40.375084, 52.771334),
    (37.867496, 53.819556),
    (36.745190, 51.102553),
    (41.287562, 49.126104),
    (44.824951, 47.179915),
    (46.539727, 49.906239),
    (47.116623, 51.026532),
];

/// The fixed coastline polyline.
pub fn coastline() -> Line {
    COAST_DEG
        .iter()
        .map(|&(lat, lon)| GeoPoint::from_degrees(lat, lon))
        .collect()
}
