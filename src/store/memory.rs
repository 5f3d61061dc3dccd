//! In-memory driver location store.

use super::r#trait::LocationStore;
use super::types::{DriverId, DriverRecord, StoreError};
use dashmap::DashMap;

/// Process-lifetime in-memory store keyed by driver id.
///
/// Backed by a sharded concurrent map, so workers upsert and the query
/// engine scans without any external locking. A scan walks the shards in
/// turn; writes landing in a shard the scan has already passed are not
/// observed by that scan, which is acceptable for this domain (reads may be
/// slightly stale, never torn).
///
/// There is no delete operation: a driver that stops reporting simply keeps
/// its last known position for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<DriverId, DriverRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Creates a store sized for an expected driver population.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
        }
    }

    /// Returns a driver's current record, if one has been reported.
    pub fn get(&self, id: DriverId) -> Option<DriverRecord> {
        self.records.get(&id).map(|entry| *entry.value())
    }
}

impl LocationStore for InMemoryStore {
    fn upsert(&self, record: DriverRecord) -> Result<(), StoreError> {
        self.records.insert(record.id, record);
        Ok(())
    }

    fn scan(&self, visitor: &mut dyn FnMut(&DriverRecord) -> bool) {
        for entry in self.records.iter() {
            if !visitor(entry.value()) {
                break;
            }
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
