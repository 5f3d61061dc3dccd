//! GeoFleet - driver location tracking for dispatch systems
//!
//! This library provides the core of a driver-location service: an
//! asynchronous ingestion pipeline that absorbs periodic location updates,
//! and an in-memory query engine that answers "nearest drivers within
//! radius" requests.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use geofleet::service::{GeoFleetService, ServiceConfig};
//! use geofleet::store::DriverRecord;
//! use geofleet::query::QueryParams;
//!
//! let service = GeoFleetService::new(ServiceConfig::default())?;
//!
//! // Fire-and-forget location update (rejected when the queue is full)
//! service.submit_update(DriverRecord::new(42, 12.9716, 77.5946, 0.7))?;
//!
//! // Radius query, capped at `limit` matches
//! let matches = service.query_nearest(&QueryParams::new(12.0, 77.0, 200_000.0, 10));
//! ```
//!
//! # Architecture
//!
//! ```text
//! submit_update ──► UpdateQueue ──► Dispatcher ──► idle Worker ──► store
//!                   (bounded,        (one hand-off    (fixed pool)
//!                    rejects on       task per job)
//!                    overflow)
//!
//! query_nearest ──► QueryEngine ──► store scan + haversine ──► matches
//! ```
//!
//! Writes are decoupled from the store behind a bounded queue and a fixed
//! worker pool; a full queue rejects the update immediately instead of
//! blocking the caller. Reads run on the calling task, concurrently with
//! worker writes.

pub mod coord;
pub mod ingest;
pub mod logging;
pub mod query;
pub mod service;
pub mod store;

/// Version of the GeoFleet library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
