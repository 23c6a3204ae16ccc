//! Session file CRUD.
//!
//! Stateless operations over `<sessions_dir>/conversation-<id>.json`.
//! Writes are atomic (temp file + rename, never truncate-in-place), so a
//! concurrent reader never observes a torn document. Read-modify-write
//! cycles are serialized per session through an advisory lock on a
//! `.lock` anchor file. The anchor is locked rather than the data file
//! because the rename in the write path replaces the data file's inode.

use crate::error::{RecorderError, Result};
use crate::session::{self, Session, SessionEntry, SessionMetadata};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Duration, Utc};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use tempfile::NamedTempFile;

/// Session file name prefix; the rest of the stem is the session id.
pub const SESSION_FILE_PREFIX: &str = "conversation-";

#[derive(Debug, Clone)]
pub struct SessionStorage {
    sessions_dir: Utf8PathBuf,
}

impl SessionStorage {
    pub fn new(sessions_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    pub fn sessions_dir(&self) -> &Utf8Path {
        &self.sessions_dir
    }

    /// Create the sessions directory tree if absent.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.sessions_dir)
            .map_err(|e| RecorderError::storage_write(&self.sessions_dir, e))
    }

    /// Path of the session file for `id`.
    pub fn session_path(&self, id: &str) -> Utf8PathBuf {
        self.sessions_dir
            .join(format!("{SESSION_FILE_PREFIX}{id}.json"))
    }

    fn lock_path(&self, id: &str) -> Utf8PathBuf {
        self.sessions_dir
            .join(format!("{SESSION_FILE_PREFIX}{id}.json.lock"))
    }

    /// Create a fresh, open session and persist it.
    pub fn create_session(&self, id: &str) -> Result<Session> {
        let session = Session::new(id);
        self.write_session(&session)?;
        Ok(session)
    }

    /// Create a session whose file already contains `entry`.
    ///
    /// The Recorder's first-append path: the session file is never
    /// observable in an empty state.
    pub fn create_session_with(&self, id: &str, entry: SessionEntry) -> Result<Session> {
        let mut session = Session::new(id);
        entry.apply_to(&mut session);
        self.write_session(&session)?;
        Ok(session)
    }

    /// Load the session for `id`.
    ///
    /// A missing file and an unparseable file both read as absent;
    /// partial writes and manual deletion are expected operational
    /// conditions, not crashes.
    pub fn load_session(&self, id: &str) -> Option<Session> {
        let content = fs::read_to_string(self.session_path(id)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Load, transform, and persist the session for `id`.
    ///
    /// Serialized against other updaters of the same session via the
    /// lock anchor; held across the whole load-transform-persist cycle.
    pub fn update_session<F>(&self, id: &str, transform: F) -> Result<Session>
    where
        F: FnOnce(Session) -> Session,
    {
        let lock = self.acquire_lock(id)?;

        let session = self
            .load_session(id)
            .ok_or_else(|| RecorderError::SessionNotFound(id.to_string()))?;
        let updated = transform(session);
        self.write_session(&updated)?;

        drop(lock);
        Ok(updated)
    }

    /// Enumerate all sessions, newest first.
    ///
    /// Files that fail to parse are skipped; a corrupt session must not
    /// abort the listing. A missing directory yields an empty list.
    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        for (_, path) in self.session_files()? {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(session) = serde_json::from_str::<Session>(&content) {
                    sessions.push(session);
                }
            }
        }
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(sessions)
    }

    /// Delete the session file for `id`. Already-absent is not an error.
    pub fn delete_session(&self, id: &str) -> Result<()> {
        let path = self.session_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(RecorderError::storage_write(&path, e)),
        }
        // the lock anchor is disposable
        let _ = fs::remove_file(self.lock_path(id));
        Ok(())
    }

    /// Generate an id for a new session, disambiguating same-second
    /// collisions with a numeric suffix.
    pub fn allocate_session_id(&self) -> String {
        let base = session::generate_session_id();
        if !self.session_path(&base).exists() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.session_path(&candidate).exists() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Delete sessions whose `startTime` is older than `retention_days`.
    ///
    /// Corrupt files are left in place; a parse failure must never
    /// destroy data. Returns the number of sessions removed.
    pub fn prune_sessions(&self, retention_days: u32) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(i64::from(retention_days));
        let mut removed = 0;
        for (id, path) in self.session_files()? {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(session) = serde_json::from_str::<Session>(&content) else {
                continue;
            };
            if session.start_time < cutoff {
                self.delete_session(&id)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Derived summary for the session at `id`.
    pub fn session_stats(&self, id: &str) -> Result<SessionMetadata> {
        let session = self
            .load_session(id)
            .ok_or_else(|| RecorderError::SessionNotFound(id.to_string()))?;
        let path = self.session_path(id);
        let size = fs::metadata(&path)
            .map_err(|e| RecorderError::storage_write(&path, e))?
            .len();
        Ok(SessionMetadata::derive(&session, size))
    }

    /// Session files in the directory, as `(id, path)` pairs.
    fn session_files(&self) -> Result<Vec<(String, Utf8PathBuf)>> {
        let entries = match fs::read_dir(&self.sessions_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RecorderError::storage_write(&self.sessions_dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(id) = name
                .strip_prefix(SESSION_FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(".json"))
            else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            files.push((id.to_string(), self.sessions_dir.join(name)));
        }
        Ok(files)
    }

    fn acquire_lock(&self, id: &str) -> Result<File> {
        self.ensure_dir()?;
        let path = self.lock_path(id);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)
            .map_err(|e| RecorderError::storage_write(&path, e))?;
        file.lock_exclusive()
            .map_err(|e| RecorderError::storage_write(&path, e))?;
        // released when the file handle closes
        Ok(file)
    }

    pub(crate) fn write_session(&self, session: &Session) -> Result<()> {
        self.ensure_dir()?;
        let path = self.session_path(&session.session_id);
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| RecorderError::storage_write(&path, e))?;
        write_atomic(&path, &json).map_err(|e| RecorderError::storage_write(&path, e))
    }
}

/// Replace the file at `path` with `contents` via temp file + rename.
///
/// The temp file lives in the destination directory so the rename stays
/// on one filesystem.
pub(crate) fn write_atomic(path: &Utf8Path, contents: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
