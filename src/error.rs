use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the habit store. Per-record parse problems are
/// not errors: bad lines are dropped at load time and logged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected before any mutation; store state is unchanged.
    #[error("{0}")]
    Validation(String),

    /// A file read or write failed. In-memory state stays authoritative
    /// for the rest of the session.
    #[error("failed to {action} {path:?}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
