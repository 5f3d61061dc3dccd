//! Driver-location service facade implementation.

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::ingest::{Dispatcher, SubmitError, UpdateQueue, UpdateSubmitter, WorkerPool};
use crate::query::{DriverMatch, QueryEngine, QueryParams};
use crate::store::{self, DriverRecord, InMemoryStore, LocationStore, StoreBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// High-level facade over the ingestion pipeline and query engine.
///
/// Constructed once at process start; the embedding server clones the
/// submitter into its write handlers and calls [`query_nearest`] from its
/// read handlers. Encapsulates all component creation and wiring: store,
/// bounded queue, dispatcher, and worker pool.
///
/// # Example
///
/// ```ignore
/// use geofleet::service::{GeoFleetService, ServiceConfig};
/// use geofleet::store::DriverRecord;
/// use geofleet::query::QueryParams;
///
/// let service = GeoFleetService::new(ServiceConfig::default())?;
///
/// service.submit_update(DriverRecord::new(42, 12.9716, 77.5946, 0.7))?;
/// let matches = service.query_nearest(&QueryParams::new(12.0, 77.0, 200_000.0, 10));
///
/// service.shutdown().await?;
/// ```
///
/// [`query_nearest`]: GeoFleetService::query_nearest
pub struct GeoFleetService {
    store: Arc<dyn LocationStore>,
    submitter: UpdateSubmitter,
    query: QueryEngine,
    shutdown: CancellationToken,
    dispatcher: JoinHandle<()>,
    workers: WorkerPool,
    snapshot_path: Option<PathBuf>,
}

impl GeoFleetService {
    /// Creates the service and starts its pipeline tasks.
    ///
    /// Must be called from within a Tokio runtime: the dispatcher and
    /// workers are spawned here.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnsupportedBackend`] if the configuration
    /// selects a backend with no implementation. Nothing is spawned in that
    /// case; the caller should treat the error as fatal and exit before
    /// serving traffic.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let store: Arc<dyn LocationStore> = match config.backend() {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
            unsupported => return Err(ServiceError::UnsupportedBackend(unsupported)),
        };

        let shutdown = CancellationToken::new();
        let (submitter, queue_rx) = UpdateQueue::bounded(config.ingest().queue_capacity);
        let (workers, idle_rx) = WorkerPool::spawn(
            config.ingest().worker_count,
            Arc::clone(&store),
            shutdown.clone(),
        );
        let dispatcher = Dispatcher::new(queue_rx, idle_rx, shutdown.clone()).spawn();

        info!(
            backend = %config.backend(),
            queue_capacity = config.ingest().queue_capacity,
            workers = workers.worker_count(),
            "driver-location service started"
        );

        Ok(Self {
            query: QueryEngine::new(Arc::clone(&store)),
            store,
            submitter,
            shutdown,
            dispatcher,
            workers,
            snapshot_path: config.snapshot_path().map(PathBuf::from),
        })
    }

    /// Submits a location update to the ingestion pipeline.
    ///
    /// Non-blocking and fire-and-forget: `Ok` means the update was queued,
    /// not that it has been applied yet. A full queue is reported as
    /// [`SubmitError::Overloaded`] so the caller can shed load.
    pub fn submit_update(&self, record: DriverRecord) -> Result<(), SubmitError> {
        self.submitter.try_submit(record)
    }

    /// Returns a cloneable submission handle for request-handling tasks.
    pub fn submitter(&self) -> UpdateSubmitter {
        self.submitter.clone()
    }

    /// Answers a radius query against the current store contents.
    ///
    /// Runs on the calling task, concurrently with in-flight writes; see
    /// [`QueryEngine::nearest`] for the result-selection caveat.
    pub fn query_nearest(&self, params: &QueryParams) -> Vec<DriverMatch> {
        self.query.nearest(params)
    }

    /// Returns the number of drivers currently tracked.
    pub fn driver_count(&self) -> usize {
        self.store.len()
    }

    /// Stops the pipeline and, if configured, dumps the store to disk.
    ///
    /// Workers finish whatever write they are applying; queued updates that
    /// never reached a worker are dropped. The snapshot happens after every
    /// worker has stopped, so it reflects all applied writes.
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        info!("stopping driver-location service");
        self.shutdown.cancel();

        if let Err(error) = self.dispatcher.await {
            warn!(%error, "dispatcher task ended abnormally");
        }
        self.workers.join_all().await;

        if let Some(path) = &self.snapshot_path {
            store::write_snapshot(self.store.as_ref(), path)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for GeoFleetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoFleetService")
            .field("drivers", &self.store.len())
            .field("queue_capacity", &self.submitter.capacity())
            .field("workers", &self.workers.worker_count())
            .finish()
    }
}
