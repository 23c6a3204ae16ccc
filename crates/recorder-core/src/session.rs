//! On-disk session schema.
//!
//! Field names are camelCase on disk so existing logs stay
//! round-trippable. Entries are immutable once appended; only the
//! enclosing arrays grow.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One continuous interaction window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Timestamp-derived id, also the file-naming key
    pub session_id: String,

    /// When the session was opened
    pub start_time: DateTime<Utc>,

    /// `null` while the session is open; set exactly once on close
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    /// User submissions, in chronological order
    pub prompts: Vec<PromptEntry>,

    /// Assistant replies and tool results, in chronological order
    pub responses: Vec<ResponseEntry>,

    /// Derived summary; never authoritative, absence is valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
}

impl Session {
    /// Build a fresh, open session with empty entry sequences.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            start_time: Utc::now(),
            end_time: None,
            prompts: Vec::new(),
            responses: Vec::new(),
            metadata: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// One user prompt submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl PromptEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            text: text.into(),
        }
    }
}

/// An assistant reply or a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseEntry {
    Assistant {
        text: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Tool {
        tool_name: String,
        result: String,
        timestamp: DateTime<Utc>,
    },
}

impl ResponseEntry {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn tool(tool_name: impl Into<String>, result: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            result: result.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Assistant { timestamp, .. } | Self::Tool { timestamp, .. } => *timestamp,
        }
    }
}

/// Either kind of appendable record, for paths that handle both.
#[derive(Debug, Clone)]
pub enum SessionEntry {
    Prompt(PromptEntry),
    Response(ResponseEntry),
}

impl SessionEntry {
    /// Append this entry to the matching sequence of `session`.
    pub fn apply_to(self, session: &mut Session) {
        match self {
            Self::Prompt(entry) => session.prompts.push(entry),
            Self::Response(entry) => session.responses.push(entry),
        }
    }
}

/// Derived per-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    /// Session file size in bytes
    pub size: u64,
    pub prompt_count: usize,
    pub response_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl SessionMetadata {
    /// Compute a summary for `session`, given its on-disk size.
    pub fn derive(session: &Session, size: u64) -> Self {
        Self {
            size,
            prompt_count: session.prompts.len(),
            response_count: session.responses.len(),
            last_updated: Utc::now(),
        }
    }
}

/// Generate a session id from the local wall clock.
///
/// Canonical form `YYYY-MM-DD_HH-MM-SS`; one-second granularity, so
/// callers creating files must disambiguate same-second collisions
/// (see `SessionStorage::allocate_session_id`).
pub fn generate_session_id() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}
