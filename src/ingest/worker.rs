//! Pool workers applying queued updates to the store.
//!
//! Each worker owns a private capacity-1 job channel. A worker publishes its
//! sender into the shared idle pool only when it is about to wait for a job,
//! so a hand-off that claims the sender is guaranteed a worker ready to
//! receive (rendezvous). After applying a job the worker re-registers; a
//! shutdown signal instead ends the loop. In-flight writes are never
//! preempted, only the next registration cycle is interrupted.

use super::job::UpdateJob;
use crate::store::LocationStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Sender side of one worker's private job channel.
pub type WorkerSender = mpsc::Sender<UpdateJob>;

/// Sending half of the idle-worker pool, held by every worker.
pub type IdleSender = mpsc::Sender<WorkerSender>;

/// Receiving half of the idle-worker pool, drained by hand-off tasks.
pub type IdleReceiver = mpsc::Receiver<WorkerSender>;

/// A single pool worker.
pub struct Worker {
    id: usize,
    store: Arc<dyn LocationStore>,
    idle_tx: IdleSender,
    job_tx: WorkerSender,
    job_rx: mpsc::Receiver<UpdateJob>,
    shutdown: CancellationToken,
}

impl Worker {
    /// Creates a worker writing to `store` and registering into the pool
    /// behind `idle_tx`.
    pub fn new(
        id: usize,
        store: Arc<dyn LocationStore>,
        idle_tx: IdleSender,
        shutdown: CancellationToken,
    ) -> Self {
        let (job_tx, job_rx) = mpsc::channel(1);
        Self {
            id,
            store,
            idle_tx,
            job_tx,
            job_rx,
            shutdown,
        }
    }

    /// Starts the worker loop on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        debug!(worker = self.id, "worker started");
        loop {
            // Announce readiness. The hand-off side pulls this sender out of
            // the pool when it has a job for us.
            if self.idle_tx.send(self.job_tx.clone()).await.is_err() {
                break;
            }

            tokio::select! {
                maybe_job = self.job_rx.recv() => match maybe_job {
                    Some(job) => self.apply(job),
                    None => break,
                },
                _ = self.shutdown.cancelled() => break,
            }
        }
        debug!(worker = self.id, "worker stopped");
    }

    /// Applies one update to the store.
    ///
    /// Failures are logged and the update is dropped: the write path is
    /// fire-and-forget from the submitter's perspective and nothing retries.
    fn apply(&self, job: UpdateJob) {
        let record = job.into_record();
        let driver = record.id;
        match self.store.upsert(record) {
            Ok(()) => debug!(worker = self.id, %driver, "location update applied"),
            Err(error) => {
                warn!(worker = self.id, %driver, %error, "dropping location update after store write failure");
            }
        }
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker").field("id", &self.id).finish()
    }
}

/// Fixed set of workers sharing one idle pool.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` workers writing to `store`.
    ///
    /// Returns the pool (for joining at shutdown) and the idle-pool receiver
    /// the dispatcher claims workers from. The pool's sending half lives
    /// only inside the workers, so once every worker has stopped the idle
    /// channel closes and pending hand-offs observe the closure instead of
    /// waiting forever.
    pub fn spawn(
        worker_count: usize,
        store: Arc<dyn LocationStore>,
        shutdown: CancellationToken,
    ) -> (Self, IdleReceiver) {
        assert!(worker_count > 0, "worker count must be > 0");

        let (idle_tx, idle_rx) = mpsc::channel(worker_count);
        let handles = (0..worker_count)
            .map(|id| {
                Worker::new(id, Arc::clone(&store), idle_tx.clone(), shutdown.clone()).spawn()
            })
            .collect();

        debug!(workers = worker_count, "worker pool started");
        (Self { handles }, idle_rx)
    }

    /// Returns the number of workers in the pool.
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to stop.
    ///
    /// Callers cancel the shutdown token first; this only joins the tasks.
    pub async fn join_all(self) {
        for handle in self.handles {
            if let Err(error) = handle.await {
                warn!(%error, "worker task ended abnormally");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DriverId, DriverRecord, InMemoryStore, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;

    /// Store stub whose writes always fail, counting the attempts.
    struct FailingStore {
        attempts: AtomicUsize,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                attempts: AtomicUsize::new(0),
            }
        }
    }

    impl LocationStore for FailingStore {
        fn upsert(&self, _record: DriverRecord) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("disk on fire".into()))
        }

        fn scan(&self, _visitor: &mut dyn FnMut(&DriverRecord) -> bool) {}

        fn len(&self) -> usize {
            0
        }
    }

    fn record(id: u64) -> DriverRecord {
        DriverRecord::new(id, 12.0, 77.0, 0.5)
    }

    #[tokio::test]
    async fn test_worker_applies_job_and_reregisters() {
        let store = Arc::new(InMemoryStore::new());
        let shutdown = CancellationToken::new();
        let (idle_tx, mut idle_rx) = mpsc::channel(1);

        let handle =
            Worker::new(0, store.clone() as Arc<dyn LocationStore>, idle_tx, shutdown.clone())
                .spawn();

        // First registration: the worker is idle and waiting.
        let worker_tx = timeout(Duration::from_secs(1), idle_rx.recv())
            .await
            .unwrap()
            .unwrap();
        worker_tx.send(UpdateJob::new(record(1))).await.unwrap();

        // The worker re-registers after applying, which also proves the
        // previous job was fully processed.
        let _again = timeout(Duration::from_secs(1), idle_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.get(DriverId(1)), Some(record(1)));

        shutdown.cancel();
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_store_write_failure() {
        let store = Arc::new(FailingStore::new());
        let shutdown = CancellationToken::new();
        let (idle_tx, mut idle_rx) = mpsc::channel(1);

        let handle = Worker::new(
            0,
            store.clone() as Arc<dyn LocationStore>,
            idle_tx,
            shutdown.clone(),
        )
        .spawn();

        for id in 1..=2u64 {
            let worker_tx = timeout(Duration::from_secs(1), idle_rx.recv())
                .await
                .unwrap()
                .unwrap();
            worker_tx.send(UpdateJob::new(record(id))).await.unwrap();
        }

        // A third registration proves the worker looped on after both
        // failed writes instead of dying.
        let _ = timeout(Duration::from_secs(1), idle_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);

        shutdown.cancel();
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_worker_stops_on_shutdown() {
        let store: Arc<dyn LocationStore> = Arc::new(InMemoryStore::new());
        let shutdown = CancellationToken::new();
        let (idle_tx, _idle_rx) = mpsc::channel(1);

        let handle = Worker::new(0, store, idle_tx, shutdown.clone()).spawn();

        shutdown.cancel();
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_pool_registers_every_worker() {
        let store: Arc<dyn LocationStore> = Arc::new(InMemoryStore::new());
        let shutdown = CancellationToken::new();

        let (pool, mut idle_rx) = WorkerPool::spawn(3, store, shutdown.clone());
        assert_eq!(pool.worker_count(), 3);

        // All three workers register themselves as idle on startup.
        for _ in 0..3 {
            timeout(Duration::from_secs(1), idle_rx.recv())
                .await
                .unwrap()
                .unwrap();
        }

        shutdown.cancel();
        timeout(Duration::from_secs(1), pool.join_all())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_idle_channel_closes_once_pool_stops() {
        let store: Arc<dyn LocationStore> = Arc::new(InMemoryStore::new());
        let shutdown = CancellationToken::new();

        let (pool, mut idle_rx) = WorkerPool::spawn(2, store, shutdown.clone());

        shutdown.cancel();
        pool.join_all().await;

        // Drain whatever registrations were in flight; the channel must then
        // report closure rather than block a future hand-off forever.
        timeout(Duration::from_secs(1), async {
            while let Some(stale) = idle_rx.recv().await {
                drop(stale);
            }
        })
        .await
        .unwrap();
    }

    #[test]
    #[should_panic(expected = "worker count must be > 0")]
    fn test_zero_worker_pool_panics() {
        let store: Arc<dyn LocationStore> = Arc::new(InMemoryStore::new());
        // Needs a runtime only if it gets past the assertion.
        let _ = WorkerPool::spawn(0, store, CancellationToken::new());
    }
}
