//! Geodesy module
//!
//! Great-circle distance between driver positions and query points, plus the
//! coordinate types shared across the store and query engine.
//!
//! Distances use the haversine formula on a sphere of Earth's equatorial
//! radius. The spherical approximation is a few metres off over city-scale
//! distances, which is well inside what dispatch radii tolerate.

mod types;


pub use types::{GeoBounds, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Earth's equatorial radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Computes the great-circle distance between two points, in meters.
///
/// Haversine formula: deterministic, side-effect free, defined for every
/// pair of on-sphere coordinates. Inputs are decimal degrees.
#[inline]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let h = haversin(lat2 - lat1) + lat1.cos() * lat2.cos() * haversin(lon2 - lon1);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Half the versed sine: sin²(θ/2).
#[inline]
fn haversin(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Converts a surface distance in meters to the equivalent central angle in
/// radians.
///
/// Companion to [`GeoBounds::around`] for backends that narrow scans by
/// coordinate range before filtering on true distance.
#[inline]
pub fn meters_to_radians(meters: f64) -> f64 {
    meters / EARTH_RADIUS_METERS
}
