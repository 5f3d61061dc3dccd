//! Bounded update queue with admission control.
//!
//! The queue is the write path's only backpressure mechanism: submitting to
//! a full queue fails immediately with [`SubmitError::Overloaded`] instead
//! of blocking the caller, so the HTTP layer can answer "server overloaded"
//! while the pipeline drains.

use super::job::UpdateJob;
use crate::store::DriverRecord;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Receiving half of the update queue, consumed by the dispatcher.
pub type JobReceiver = mpsc::Receiver<UpdateJob>;

/// Errors from submitting an update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The queue is at capacity. The update was rejected, not queued; the
    /// caller may retry later.
    #[error("update queue is full, server overloaded")]
    Overloaded,

    /// The pipeline has shut down and no longer accepts updates.
    #[error("ingestion pipeline is closed")]
    Closed,
}

/// Bounded buffer of pending location updates.
pub struct UpdateQueue;

impl UpdateQueue {
    /// Creates a queue of the given capacity, returning the submission
    /// handle and the receiver the dispatcher drains.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a zero-capacity queue could never
    /// accept a submission).
    pub fn bounded(capacity: usize) -> (UpdateSubmitter, JobReceiver) {
        assert!(capacity > 0, "queue capacity must be > 0");
        let (tx, rx) = mpsc::channel(capacity);
        (UpdateSubmitter { tx }, rx)
    }
}

/// Cloneable handle for submitting updates into the queue.
///
/// Shared by however many request-handling tasks the embedding server runs.
#[derive(Clone)]
pub struct UpdateSubmitter {
    tx: mpsc::Sender<UpdateJob>,
}

impl UpdateSubmitter {
    /// Enqueues a location update without blocking.
    ///
    /// Fire-and-forget: acceptance only means the update is queued. Whether
    /// the eventual store write succeeds is not reported back here.
    pub fn try_submit(&self, record: DriverRecord) -> Result<(), SubmitError> {
        self.tx
            .try_send(UpdateJob::new(record))
            .map_err(|error| match error {
                TrySendError::Full(_) => SubmitError::Overloaded,
                TrySendError::Closed(_) => SubmitError::Closed,
            })
    }

    /// Returns the queue's configured capacity.
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

impl std::fmt::Debug for UpdateSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateSubmitter")
            .field("capacity", &self.tx.max_capacity())
            .finish()
    }
}
