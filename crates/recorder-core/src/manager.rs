//! Session lifecycle orchestration.

use crate::config::RecorderConfig;
use crate::error::Result;
use crate::pointer::SessionPointer;
use crate::session::{PromptEntry, ResponseEntry, Session};
use crate::storage::SessionStorage;
use camino::Utf8Path;
use chrono::Utc;

/// Orchestrates start/end/append over `SessionStorage`, tracking the
/// current session id in memory and rehydrating it lazily from the
/// pointer file, so independent processes agree on which session is
/// current.
#[derive(Debug)]
pub struct SessionManager {
    storage: SessionStorage,
    pointer: SessionPointer,
    current: Option<String>,
}

impl SessionManager {
    pub fn new(storage: SessionStorage, pointer: SessionPointer) -> Self {
        Self {
            storage,
            pointer,
            current: None,
        }
    }

    /// Build storage and pointer from a loaded config.
    pub fn from_config(config: &RecorderConfig, config_path: &Utf8Path) -> Self {
        let sessions_dir = config.resolve_sessions_dir(config_path);
        let pointer = SessionPointer::for_sessions_dir(&sessions_dir);
        Self::new(SessionStorage::new(sessions_dir), pointer)
    }

    /// Start a new session, generating an id when none is given, and
    /// record it as current.
    pub fn start_session(&mut self, session_id: Option<String>) -> Result<Session> {
        self.storage.ensure_dir()?;

        let id = session_id.unwrap_or_else(|| self.storage.allocate_session_id());
        let session = self.storage.create_session(&id)?;

        self.pointer.set(&id)?;
        self.current = Some(id);

        Ok(session)
    }

    /// Close the current session. No-op when none is tracked.
    pub fn end_session(&mut self) -> Result<()> {
        let Some(id) = self.current_id() else {
            return Ok(());
        };

        self.storage.update_session(&id, |mut session| {
            if session.end_time.is_none() {
                session.end_time = Some(Utc::now());
            }
            session
        })?;

        self.pointer.clear()?;
        self.current = None;
        Ok(())
    }

    /// The current session, if one is tracked and its file still loads.
    pub fn current_session(&mut self) -> Option<Session> {
        let id = self.current_id()?;
        self.storage.load_session(&id)
    }

    /// Append a prompt, starting a session first if none is current.
    ///
    /// Starts unconditionally; `autoStart` is declared in config but not
    /// consulted here.
    pub fn add_prompt(&mut self, text: &str) -> Result<()> {
        let id = match self.current_id() {
            Some(id) => id,
            None => self.start_session(None)?.session_id,
        };

        let entry = PromptEntry::new(text);
        self.storage.update_session(&id, move |mut session| {
            session.prompts.push(entry);
            session
        })?;
        Ok(())
    }

    /// Append a response. No-op when no session is current.
    pub fn add_response(&mut self, entry: ResponseEntry) -> Result<()> {
        let Some(id) = self.current_id() else {
            return Ok(());
        };

        self.storage.update_session(&id, move |mut session| {
            session.responses.push(entry);
            session
        })?;
        Ok(())
    }

    /// All sessions, newest first.
    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        self.storage.list_sessions()
    }

    fn current_id(&mut self) -> Option<String> {
        if self.current.is_none() {
            self.current = self.pointer.get();
        }
        self.current.clone()
    }
}
