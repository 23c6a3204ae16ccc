//! Error taxonomy for the recorder core.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecorderError>;

type Source = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RecorderError {
    /// Config file missing, unreadable, or not valid JSON. Fatal to the
    /// invocation; there is no silent default.
    #[error("failed to read config {path}")]
    ConfigRead {
        path: Utf8PathBuf,
        #[source]
        source: Source,
    },

    /// Filesystem write or delete failure in the storage layer.
    #[error("storage operation failed for {path}")]
    StorageWrite {
        path: Utf8PathBuf,
        #[source]
        source: Source,
    },

    /// Update targeted a session id with no backing file.
    #[error("session {0} not found")]
    SessionNotFound(String),
}

impl RecorderError {
    pub(crate) fn config_read(path: &Utf8Path, source: impl Into<Source>) -> Self {
        Self::ConfigRead {
            path: path.to_owned(),
            source: source.into(),
        }
    }

    pub(crate) fn storage_write(path: &Utf8Path, source: impl Into<Source>) -> Self {
        Self::StorageWrite {
            path: path.to_owned(),
            source: source.into(),
        }
    }
}
