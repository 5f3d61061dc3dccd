//! Coordinate type definitions

/// Valid latitude range (degrees)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range (degrees)
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic position in decimal degrees.
///
/// Coordinates are assumed to be validated upstream (request validators own
/// range checks); the math in this module treats every point as on-sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from decimal-degree coordinates.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A latitude/longitude rectangle around a centre point.
///
/// Used to pre-narrow scans in range-indexed backends; the in-memory store
/// scans every entry and has no use for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeoBounds {
    /// Returns the rectangle of angular half-width `radius_radians` around
    /// `centre`.
    ///
    /// The radius must already be converted to radians. Bounds are not
    /// clamped or wrapped at the poles/antimeridian; backends that index by
    /// coordinate range are expected to handle wrap-around themselves.
    pub fn around(centre: GeoPoint, radius_radians: f64) -> Self {
        Self {
            min_latitude: centre.latitude - radius_radians,
            max_latitude: centre.latitude + radius_radians,
            min_longitude: centre.longitude - radius_radians,
            max_longitude: centre.longitude + radius_radians,
        }
    }

    /// Returns true if the point falls inside the rectangle (inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}
