//! The current-session pointer.
//!
//! A single state file (`.current-session`, next to the sessions
//! directory) holds the raw id of the active session. Both the
//! `SessionManager` and the `Recorder` route through this type, so there
//! is exactly one pointer mechanism in the system.

use crate::error::{RecorderError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

/// File name of the pointer state file.
pub const CURRENT_SESSION_FILE: &str = ".current-session";

#[derive(Debug, Clone)]
pub struct SessionPointer {
    path: Utf8PathBuf,
}

impl SessionPointer {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location: sibling of the sessions directory.
    pub fn for_sessions_dir(sessions_dir: &Utf8Path) -> Self {
        let parent = sessions_dir.parent().unwrap_or_else(|| Utf8Path::new("."));
        Self::new(parent.join(CURRENT_SESSION_FILE))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the current session id.
    ///
    /// Missing, unreadable, or empty pointer files all read as "no
    /// current session"; a stale or damaged pointer must never crash a
    /// hook.
    pub fn get(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let id = content.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    /// Record `id` as the current session, replacing any previous value.
    pub fn set(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::storage_write(parent, e))?;
        }
        fs::write(&self.path, id).map_err(|e| RecorderError::storage_write(&self.path, e))
    }

    /// Claim the pointer only if no other process holds it.
    ///
    /// Create-if-absent compare-and-swap: returns `None` when `id` was
    /// installed, or `Some(winner)` with the id already in place. A
    /// pointer file that exists but reads empty is treated as vacant and
    /// overwritten.
    pub fn set_if_vacant(&self, id: &str) -> Result<Option<String>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::storage_write(parent, e))?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(id.as_bytes())
                    .map_err(|e| RecorderError::storage_write(&self.path, e))?;
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => match self.get() {
                Some(winner) => Ok(Some(winner)),
                None => {
                    self.set(id)?;
                    Ok(None)
                }
            },
            Err(e) => Err(RecorderError::storage_write(&self.path, e)),
        }
    }

    /// Clear the pointer. An already-absent file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecorderError::storage_write(&self.path, e)),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
