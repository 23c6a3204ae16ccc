//! Debug logging for hooks.
//!
//! Hooks must keep stdout clean for the host protocol, so diagnostics go
//! to a JSONL file instead. Logging is off unless `RECORDER_DEBUG` is set
//! or a `.recorder-debug` marker file exists under the plugin root.

use crate::paths::plugin_root;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

/// One logged hook decision.
#[derive(Debug, Serialize)]
pub struct DebugLog {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "user-prompt-hook")
    pub hook: String,
    /// What the hook did (e.g., "recorded", "skipped")
    pub action: String,
    /// Session the action applied to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Free-form detail, truncated for large inputs
    pub detail: String,
}

const MAX_DETAIL_LENGTH: usize = 200;

impl DebugLog {
    pub fn new(hook: &str, action: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook: hook.to_string(),
            action: action.to_string(),
            session_id: None,
            detail: String::new(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = if detail.len() > MAX_DETAIL_LENGTH {
            let cut = detail
                .char_indices()
                .take_while(|(i, _)| *i < MAX_DETAIL_LENGTH)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &detail[..cut])
        } else {
            detail.to_string()
        };
        self
    }

    /// Append the entry to the debug log, if debug mode is enabled.
    ///
    /// Logging failures are swallowed; diagnostics never fail a hook.
    pub fn write(&self) {
        if !is_debug_enabled() {
            return;
        }
        let _ = self.append_to(&debug_log_path());
    }

    fn append_to(&self, path: &Utf8Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        let json = serde_json::to_string(self).unwrap_or_default();
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

/// Check if debug mode is enabled.
pub fn is_debug_enabled() -> bool {
    if std::env::var("RECORDER_DEBUG").is_ok() {
        return true;
    }

    plugin_root().join(".recorder-debug").exists()
}

/// Get the debug log file path.
pub fn debug_log_path() -> Utf8PathBuf {
    plugin_root().join("logs").join("recorder-debug.jsonl")
}
