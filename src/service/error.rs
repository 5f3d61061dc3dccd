//! Service error types.

use crate::store::{SnapshotError, StoreBackend};
use thiserror::Error;

/// Errors that can occur while starting or stopping the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The configured storage backend has no implementation. Fatal: the
    /// process must exit before serving any traffic rather than run against
    /// a store it cannot write to.
    #[error("unsupported storage backend \"{0}\"")]
    UnsupportedBackend(StoreBackend),

    /// The best-effort shutdown snapshot failed. The pipeline is already
    /// stopped when this is reported; callers typically log it and exit.
    #[error("shutdown snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),
}
