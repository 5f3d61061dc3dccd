//! Service configuration types.

use crate::ingest::IngestConfig;
use crate::store::StoreBackend;
use std::path::{Path, PathBuf};

/// Configuration for the driver-location service.
///
/// Combines backend selection, pipeline sizing, and the optional shutdown
/// snapshot target.
///
/// # Example
///
/// ```
/// use geofleet::ingest::IngestConfig;
/// use geofleet::service::ServiceConfig;
/// use geofleet::store::StoreBackend;
///
/// let config = ServiceConfig::default()
///     .with_backend(StoreBackend::Memory)
///     .with_ingest(IngestConfig::new(1024, 4))
///     .with_snapshot_path("drivers.jsonl");
///
/// assert_eq!(config.ingest().worker_count, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Storage backend selection.
    backend: StoreBackend,
    /// Queue and worker pool sizing.
    ingest: IngestConfig,
    /// Where to dump the store on graceful shutdown, if anywhere.
    snapshot_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Selects the storage backend.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the ingestion pipeline sizing.
    pub fn with_ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    /// Enables the best-effort shutdown snapshot, dumped to `path`.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Returns the selected backend.
    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    /// Returns the pipeline sizing.
    pub fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    /// Returns the snapshot target, if configured.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }
}
