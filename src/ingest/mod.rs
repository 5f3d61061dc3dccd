//! Asynchronous ingestion pipeline
//!
//! Decouples the write path from the store behind a bounded queue and a
//! fixed worker pool:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      UpdateSubmitter                         │
//! │  Non-blocking enqueue; a full queue rejects the update       │
//! ├──────────────────────────────────────────────────────────────┤
//! │                        Dispatcher                            │
//! │  One loop; one ephemeral hand-off task per dequeued job      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────┐        ┌────────────┐        │
//! │  │  Worker 0  │  │  Worker 1  │  ...   │  Worker N  │        │
//! │  │  (idle ⇄   │  │            │        │            │        │
//! │  │   apply)   │  │            │        │            │        │
//! │  └────────────┘  └────────────┘        └────────────┘        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workers self-register: each publishes its private job channel into a
//! shared idle pool when ready, and a hand-off task completes a rendezvous
//! send into whichever worker it claims. Admission control is the queue
//! bound; everything past the queue is fire-and-forget, with store write
//! failures logged and dropped.

mod config;
mod dispatcher;
mod job;
mod queue;
mod worker;

pub use config::{
    default_worker_count, IngestConfig, DEFAULT_MAX_TRACKED_DRIVERS, DEFAULT_QUEUE_CAPACITY,
    FALLBACK_WORKER_COUNT,
};
pub use dispatcher::Dispatcher;
pub use job::UpdateJob;
pub use queue::{JobReceiver, SubmitError, UpdateQueue, UpdateSubmitter};
pub use worker::{IdleReceiver, IdleSender, Worker, WorkerPool, WorkerSender};
