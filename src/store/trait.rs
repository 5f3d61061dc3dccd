//! Store trait definition for dependency injection.

use super::types::{DriverRecord, StoreError};

/// Driver location store abstraction.
///
/// Enables different storage strategies (in-memory map today, external
/// databases later) to sit behind the ingestion workers and the query engine
/// without either knowing the concrete backend.
///
/// # Consistency
///
/// - `upsert` is last-write-wins per driver id. No versioning or ordering
///   guarantee exists across concurrent writers beyond whichever write the
///   backend applies last.
/// - `scan` takes no snapshot: upserts that land during a scan may or may
///   not be observed by that scan. Callers tolerate slightly stale reads;
///   implementations must still never expose a torn record.
pub trait LocationStore: Send + Sync {
    /// Writes or overwrites the record keyed by `record.id`.
    ///
    /// No validation happens at this layer; callers hand in records with
    /// already-validated coordinates.
    fn upsert(&self, record: DriverRecord) -> Result<(), StoreError>;

    /// Visits current entries in unspecified order.
    ///
    /// The visitor returns `true` to continue and `false` to stop early.
    /// Iteration order is an implementation detail and may differ between
    /// scans of the same store.
    fn scan(&self, visitor: &mut dyn FnMut(&DriverRecord) -> bool);

    /// Returns the number of drivers currently tracked.
    fn len(&self) -> usize;

    /// Returns true if no drivers are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
