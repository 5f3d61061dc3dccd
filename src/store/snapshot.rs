//! Best-effort shutdown snapshot of the driver store.
//!
//! On graceful shutdown the service may dump every tracked record to a file,
//! one JSON object per line, so the last known fleet positions survive for
//! offline inspection. The snapshot is not reloaded on startup; a restarted
//! process always begins from an empty store.

use super::r#trait::LocationStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors from writing a store snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Creating or writing the target file failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes every record in the store to `path` as newline-delimited JSON.
///
/// The target file is truncated first; a snapshot is a complete dump, not an
/// append. Returns the number of records written. A failure mid-dump leaves
/// a partial file behind — the snapshot is best-effort and callers treat
/// errors as non-fatal.
pub fn write_snapshot(store: &dyn LocationStore, path: &Path) -> Result<usize, SnapshotError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut written = 0usize;
    let mut failure: Option<SnapshotError> = None;

    store.scan(&mut |record| {
        let result = serde_json::to_writer(&mut writer, record)
            .map_err(SnapshotError::from)
            .and_then(|()| writer.write_all(b"\n").map_err(SnapshotError::from));

        match result {
            Ok(()) => {
                written += 1;
                true
            }
            Err(error) => {
                failure = Some(error);
                false
            }
        }
    });

    if let Some(error) = failure {
        return Err(error);
    }
    writer.flush()?;

    info!(records = written, path = %path.display(), "store snapshot written");
    Ok(written)
}
