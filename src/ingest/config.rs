//! Ingestion pipeline configuration.

// =============================================================================
// Configuration Constants
// =============================================================================

/// Default size of the driver population the queue is provisioned for.
pub const DEFAULT_MAX_TRACKED_DRIVERS: usize = 50_000;

/// Default update queue capacity.
///
/// Twice the provisioned driver population, so a full fleet reporting while
/// the previous round is still draining does not trip admission control. The
/// multiple is tunable; smaller deployments should shrink it along with the
/// population.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2 * DEFAULT_MAX_TRACKED_DRIVERS;

/// Worker count used when available parallelism cannot be determined.
pub const FALLBACK_WORKER_COUNT: usize = 4;

/// Returns the default worker pool size for this host.
///
/// Store writes are brief, so one worker per available core is plenty.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKER_COUNT)
}

// =============================================================================
// Ingest Configuration
// =============================================================================

/// Configuration for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Update queue capacity; submissions beyond it are rejected.
    pub queue_capacity: usize,

    /// Number of pool workers applying updates to the store.
    pub worker_count: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            worker_count: default_worker_count(),
        }
    }
}

impl IngestConfig {
    /// Creates a configuration with explicit capacities.
    pub fn new(queue_capacity: usize, worker_count: usize) -> Self {
        Self {
            queue_capacity,
            worker_count,
        }
    }

    /// Sets the update queue capacity.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Sets the worker pool size.
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }
}
