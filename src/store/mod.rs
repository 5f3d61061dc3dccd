//! Driver location store
//!
//! Maps each driver id to its latest reported location. Writes come from the
//! ingestion workers (last-write-wins), reads from the query engine's full
//! scans. The store lives for the process lifetime; on graceful shutdown it
//! can be dumped to disk via [`write_snapshot`].
//!
//! The [`LocationStore`] trait is the seam between the pipeline and the
//! backend. Only the in-memory backend exists today; selecting anything else
//! in [`StoreBackend`] is a fatal configuration error at startup.

mod memory;
mod snapshot;
mod r#trait;
mod types;

pub use memory::InMemoryStore;
pub use snapshot::{write_snapshot, SnapshotError};
pub use r#trait::LocationStore;
pub use types::{DriverId, DriverRecord, StoreBackend, StoreError};
