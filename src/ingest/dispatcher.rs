//! Job dispatching.
//!
//! The dispatcher is a single loop pairing queued updates with idle workers.
//! It never applies a write itself: for every job it pulls off the queue it
//! spawns an ephemeral hand-off task, so the loop is already watching the
//! queue again while the hand-off waits for a worker to free up. Several
//! hand-offs may be in flight at once; each job still reaches exactly one
//! worker.
//!
//! No ordering guarantee exists across jobs — concurrent hand-offs race for
//! workers — but jobs executed by a single worker are strictly sequential.

use super::job::UpdateJob;
use super::queue::JobReceiver;
use super::worker::IdleReceiver;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The queue-to-worker matching loop.
pub struct Dispatcher {
    queue_rx: JobReceiver,
    idle_workers: Arc<Mutex<IdleReceiver>>,
    shutdown: CancellationToken,
}

impl Dispatcher {
    /// Creates a dispatcher draining `queue_rx` and claiming workers from
    /// `idle_workers`.
    pub fn new(
        queue_rx: JobReceiver,
        idle_workers: IdleReceiver,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            queue_rx,
            // Hand-off tasks run concurrently, so the single idle-pool
            // receiver is shared behind a lock; each hand-off claims exactly
            // one worker while holding it.
            idle_workers: Arc::new(Mutex::new(idle_workers)),
            shutdown,
        }
    }

    /// Starts the dispatch loop on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the dispatch loop until shutdown or until every submitter is
    /// gone.
    pub async fn run(mut self) {
        debug!("dispatcher started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                maybe_job = self.queue_rx.recv() => match maybe_job {
                    Some(job) => {
                        let idle_workers = Arc::clone(&self.idle_workers);
                        tokio::spawn(hand_off(idle_workers, job));
                    }
                    None => break,
                },
            }
        }
        debug!("dispatcher stopped");
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// Hands one job to the next idle worker.
///
/// Blocks until a worker registers as idle, then completes the rendezvous
/// send into that worker's private channel. If the pool has shut down by the
/// time a worker would be claimed, the job is dropped; at that point the
/// process is ending and the write path is fire-and-forget anyway.
async fn hand_off(idle_workers: Arc<Mutex<IdleReceiver>>, job: UpdateJob) {
    let claimed = {
        let mut idle_workers = idle_workers.lock().await;
        idle_workers.recv().await
    };

    let Some(worker_tx) = claimed else {
        debug!(driver = %job.record().id, "worker pool closed, dropping queued update");
        return;
    };

    if worker_tx.send(job).await.is_err() {
        debug!("worker stopped before hand-off completed, dropping queued update");
    }
}
