//! Radius query engine
//!
//! Answers "which drivers are within `radius` meters of this point, capped
//! at `limit`" against the shared location store. Queries run on the calling
//! task, concurrently with ingestion writes; the store's own locking keeps
//! reads untorn, and slightly stale results are acceptable in this domain.

use crate::coord::{self, GeoPoint};
use crate::store::{DriverId, LocationStore};
use serde::Serialize;
use std::sync::Arc;

/// Parameters of a radius query, validated upstream.
///
/// `radius_meters` is always >= 0 and `limit` always >= 1 by the time a
/// request reaches the engine; request validators own those checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryParams {
    /// Query centre latitude in degrees.
    pub latitude: f64,
    /// Query centre longitude in degrees.
    pub longitude: f64,
    /// Inclusive great-circle search radius in meters.
    pub radius_meters: f64,
    /// Maximum number of matches to return.
    pub limit: usize,
}

impl QueryParams {
    /// Creates query parameters from already-validated request fields.
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64, limit: usize) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
            limit,
        }
    }

    /// Returns the query centre as a geographic point.
    #[inline]
    pub fn centre(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A driver matched by a radius query.
///
/// Unlike the stored [`crate::store::DriverRecord`], a match carries the
/// computed great-circle distance from the query centre instead of the
/// reported accuracy. Matches are query output only and are never written
/// back into the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriverMatch {
    /// Matched driver's identity.
    pub driver_id: DriverId,
    /// Driver's stored latitude in degrees.
    pub latitude: f64,
    /// Driver's stored longitude in degrees.
    pub longitude: f64,
    /// Great-circle distance from the query centre, in meters.
    pub distance_meters: f64,
}

/// Query engine over a shared location store.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn LocationStore>,
}

impl QueryEngine {
    /// Creates an engine reading from the given store.
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Returns up to `limit` drivers within `radius_meters` of the centre.
    ///
    /// Scans every stored entry, computing the great-circle distance per
    /// driver, and stops as soon as `limit` matches have accumulated.
    ///
    /// **Result selection caveat**: because iteration order over the store
    /// is unspecified and the scan stops at `limit`, the result is the first
    /// `limit` in-radius drivers *encountered*, not necessarily the `limit`
    /// *nearest* ones. This cutoff is deliberate (the requirement caps the
    /// result count without asking for a ranked top-K) and callers must not
    /// assume the returned set is the closest possible one.
    ///
    /// An empty store, or no drivers within the radius, yields an empty
    /// vector; that is a successful query, not an error.
    pub fn nearest(&self, params: &QueryParams) -> Vec<DriverMatch> {
        let centre = params.centre();
        let mut matches = Vec::with_capacity(params.limit.min(64));

        self.store.scan(&mut |record| {
            let distance = coord::distance_meters(centre, record.position());
            if distance <= params.radius_meters {
                matches.push(DriverMatch {
                    driver_id: record.id,
                    latitude: record.latitude,
                    longitude: record.longitude,
                    distance_meters: distance,
                });
            }
            matches.len() < params.limit
        });

        matches
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("drivers", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DriverRecord, InMemoryStore};

    /// Three drivers from the reference dispatch scenario: two in central
    /// Bangalore (~125 km from the (12, 77) query point), one further out
    /// (~191 km).
    fn bangalore_store() -> Arc<dyn LocationStore> {
        let store = InMemoryStore::new();
        store
            .upsert(DriverRecord::new(1234, 12.97161923, 77.59463452, 0.7))
            .unwrap();
        store
            .upsert(DriverRecord::new(6547, 12.96161923, 77.58463452, 0.8))
            .unwrap();
        store
            .upsert(DriverRecord::new(42, 10.97161923, 75.59463452, 0.9))
            .unwrap();
        Arc::new(store)
    }

    #[test]
    fn test_limit_one_returns_single_match() {
        let engine = QueryEngine::new(bangalore_store());
        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 200_000.0, 1));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_limit_two_returns_both_in_radius() {
        let engine = QueryEngine::new(bangalore_store());
        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 200_000.0, 2));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_wide_radius_catches_the_whole_fleet() {
        let engine = QueryEngine::new(bangalore_store());
        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 200_000.0, 4));
        assert_eq!(matches.len(), 3, "all three drivers sit inside 200 km");
    }

    #[test]
    fn test_limit_above_match_count_returns_all_matches() {
        let engine = QueryEngine::new(bangalore_store());
        // 150 km keeps the two central drivers and excludes the far one.
        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 150_000.0, 4));
        assert_eq!(matches.len(), 2);
        for m in &matches {
            assert_ne!(m.driver_id, DriverId(42));
        }
    }

    #[test]
    fn test_tight_radius_matches_nothing() {
        let engine = QueryEngine::new(bangalore_store());
        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 1000.0, 1));
        assert!(matches.is_empty());
    }

    #[test]
    fn test_empty_store_yields_empty_result() {
        let engine = QueryEngine::new(Arc::new(InMemoryStore::new()));
        let matches = engine.nearest(&QueryParams::new(0.0, 0.0, 1_000_000.0, 10));
        assert!(matches.is_empty());
    }

    #[test]
    fn test_never_exceeds_limit() {
        let store = InMemoryStore::new();
        for id in 0..50u64 {
            // All drivers on the same block.
            store
                .upsert(DriverRecord::new(id, 12.0, 77.0, 0.5))
                .unwrap();
        }
        let engine = QueryEngine::new(Arc::new(store));

        for limit in [1usize, 5, 49, 50] {
            let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 5000.0, limit));
            assert_eq!(matches.len(), limit.min(50));
        }
    }

    #[test]
    fn test_every_match_is_within_radius() {
        let store = InMemoryStore::new();
        for id in 0..20u64 {
            let offset = id as f64 * 0.01;
            store
                .upsert(DriverRecord::new(id, 12.0 + offset, 77.0, 0.5))
                .unwrap();
        }
        let engine = QueryEngine::new(Arc::new(store));

        let params = QueryParams::new(12.0, 77.0, 10_000.0, 20);
        let matches = engine.nearest(&params);

        assert!(!matches.is_empty());
        for m in &matches {
            assert!(
                m.distance_meters <= params.radius_meters,
                "driver {} at {} m exceeds the {} m radius",
                m.driver_id,
                m.distance_meters,
                params.radius_meters
            );
        }
    }

    #[test]
    fn test_match_distance_agrees_with_distance_function() {
        let engine = QueryEngine::new(bangalore_store());
        let params = QueryParams::new(12.0, 77.0, 200_000.0, 4);

        for m in engine.nearest(&params) {
            let expected = coord::distance_meters(
                params.centre(),
                GeoPoint::new(m.latitude, m.longitude),
            );
            assert_eq!(m.distance_meters, expected);
        }
    }

    #[test]
    fn test_match_carries_stored_coordinates() {
        let store = InMemoryStore::new();
        store
            .upsert(DriverRecord::new(7, 12.5, 77.5, 0.9))
            .unwrap();
        let engine = QueryEngine::new(Arc::new(store));

        let matches = engine.nearest(&QueryParams::new(12.5, 77.5, 100.0, 1));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].driver_id, DriverId(7));
        assert_eq!(matches[0].latitude, 12.5);
        assert_eq!(matches[0].longitude, 77.5);
        assert_eq!(matches[0].distance_meters, 0.0);
    }

    #[test]
    fn test_zero_radius_matches_only_exact_position() {
        let store = InMemoryStore::new();
        store.upsert(DriverRecord::new(1, 12.0, 77.0, 0.5)).unwrap();
        store.upsert(DriverRecord::new(2, 12.1, 77.0, 0.5)).unwrap();
        let engine = QueryEngine::new(Arc::new(store));

        let matches = engine.nearest(&QueryParams::new(12.0, 77.0, 0.0, 10));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].driver_id, DriverId(1));
    }

    #[test]
    fn test_match_serializes_for_response_building() {
        let m = DriverMatch {
            driver_id: DriverId(5),
            latitude: 1.0,
            longitude: 2.0,
            distance_meters: 3.5,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"driver_id\":5"));
        assert!(json.contains("\"distance_meters\":3.5"));
    }
}
