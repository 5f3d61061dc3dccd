//! Core types for the driver location store.

use crate::coord::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a driver.
///
/// Stable across updates: every location update for the same driver carries
/// the same id, and the store keys on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u64);

impl DriverId {
    /// Returns the raw numeric id.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DriverId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A driver's most recent reported location.
///
/// This is the record as written: `accuracy` is the reporting device's
/// confidence (0.0..1.0). Query results are a separate type
/// ([`crate::query::DriverMatch`]) carrying a computed distance instead, so
/// the two meanings can never be confused or written back into the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    /// Driver identity, the store key.
    pub id: DriverId,
    /// Latitude in degrees (-90..90), validated upstream.
    pub latitude: f64,
    /// Longitude in degrees (-180..180), validated upstream.
    pub longitude: f64,
    /// Reported location accuracy (0.0..1.0), validated upstream.
    pub accuracy: f64,
}

impl DriverRecord {
    /// Creates a record from already-validated update fields.
    pub fn new(id: impl Into<DriverId>, latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Returns the record's position as a geographic point.
    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Storage backend selection.
///
/// Only the in-memory backend is implemented. `MySql` is declared so the
/// configuration surface matches the intended deployment shape; selecting it
/// fails service construction before any traffic is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-lifetime in-memory map.
    #[default]
    Memory,
    /// Relational backend, not yet implemented.
    MySql,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::MySql => write!(f, "mysql"),
        }
    }
}

/// Errors surfaced by store write operations.
///
/// The in-memory store never fails; the variant exists for backends that
/// talk to external storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage rejected or lost the write.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
