//! Recorder configuration.
//!
//! The config file holds static policy only; the current-session pointer
//! lives in its own state file (see `pointer`). Every invocation reloads
//! the config from disk, no caching, so each process observes the latest
//! state written by any other.

use crate::error::{RecorderError, Result};
use crate::storage;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Serialization format for session files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    Json,
}

/// Process-wide recorder policy, loaded fresh at the start of each
/// invocation.
///
/// Unknown fields in an existing file (including the legacy
/// `currentSessionFile` pointer) are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Whether recording starts automatically on the first prompt
    pub auto_start: bool,

    /// Session file format
    pub format: StorageFormat,

    /// Whether tool results are recorded
    pub include_tool_results: bool,

    /// Whether entries carry timestamps (reserved; entry ordering
    /// depends on timestamps, so the schema always includes them)
    pub include_timestamps: bool,

    /// Upper bound for a single session, e.g. "100MB" (reserved)
    pub max_session_size: String,

    /// Sessions older than this many days are pruned at session close
    pub retention_days: u32,

    /// Session storage directory; relative values resolve against the
    /// plugin root
    pub sessions_dir: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            format: StorageFormat::Json,
            include_tool_results: true,
            include_timestamps: true,
            max_session_size: "100MB".to_string(),
            retention_days: 90,
            sessions_dir: "./sessions".to_string(),
        }
    }
}

impl RecorderConfig {
    /// Read and decode the config file at `path`.
    ///
    /// Missing, unreadable, or malformed config is fatal; there is no
    /// silent default.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| RecorderError::config_read(path, e))?;
        serde_json::from_str(&content).map_err(|e| RecorderError::config_read(path, e))
    }

    /// Persist the config as pretty-printed JSON, replacing the file
    /// atomically.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RecorderError::storage_write(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RecorderError::storage_write(path, e))?;
        storage::write_atomic(path, &json).map_err(|e| RecorderError::storage_write(path, e))
    }

    /// Absolutize `sessions_dir` against the plugin root (the parent of
    /// the config file's directory).
    pub fn resolve_sessions_dir(&self, config_path: &Utf8Path) -> Utf8PathBuf {
        let dir = Utf8Path::new(&self.sessions_dir);
        if dir.is_absolute() {
            return dir.to_owned();
        }

        let root = config_path
            .parent()
            .and_then(Utf8Path::parent)
            .unwrap_or_else(|| Utf8Path::new("."));
        let relative = dir.strip_prefix(".").unwrap_or(dir);
        root.join(relative)
    }

    /// Parse `max_session_size` into bytes; `None` when malformed.
    pub fn max_session_size_bytes(&self) -> Option<u64> {
        parse_size(&self.max_session_size)
    }
}

/// Parse a human-readable size like "100MB" or "512KB" into bytes.
pub fn parse_size(value: &str) -> Option<u64> {
    let v = value.trim().to_ascii_uppercase();
    let (number, multiplier) = if let Some(n) = v.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = v.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = v.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = v.strip_suffix('B') {
        (n, 1)
    } else {
        (v.as_str(), 1)
    };

    let number: u64 = number.trim().parse().ok()?;
    number.checked_mul(multiplier)
}
