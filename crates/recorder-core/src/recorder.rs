//! Hook-invocation entry logic.
//!
//! One `Recorder` is opened per hook invocation: load config, resolve
//! the sessions directory, perform a single append or close, exit. When
//! no session is current the first append claims the pointer with
//! compare-and-swap and writes a session file that already contains the
//! entry, so neither an empty session nor a torn pointer is ever
//! observable. A stale pointer (an id whose file is missing or corrupt)
//! is replaced on append and cleared on close.

use crate::config::RecorderConfig;
use crate::error::Result;
use crate::pointer::SessionPointer;
use crate::session::{PromptEntry, ResponseEntry, SessionEntry};
use crate::storage::SessionStorage;
use camino::Utf8Path;
use chrono::Utc;

#[derive(Debug)]
pub struct Recorder {
    config: RecorderConfig,
    storage: SessionStorage,
    pointer: SessionPointer,
}

impl Recorder {
    /// Load the config at `config_path` and set up storage and pointer.
    ///
    /// An unreadable config is fatal to the invocation.
    pub fn open(config_path: &Utf8Path) -> Result<Self> {
        let config = RecorderConfig::load(config_path)?;
        let sessions_dir = config.resolve_sessions_dir(config_path);
        let pointer = SessionPointer::for_sessions_dir(&sessions_dir);
        Ok(Self {
            config,
            storage: SessionStorage::new(sessions_dir),
            pointer,
        })
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Record one user prompt; returns the id of the session appended to.
    pub fn record_prompt(&self, text: &str) -> Result<String> {
        self.append(SessionEntry::Prompt(PromptEntry::new(text)))
    }

    /// Record one tool result; returns the id of the session appended
    /// to, or `None` when `includeToolResults` is off.
    pub fn record_tool_result(&self, tool_name: &str, result: &str) -> Result<Option<String>> {
        if !self.config.include_tool_results {
            return Ok(None);
        }
        self.append(SessionEntry::Response(ResponseEntry::tool(
            tool_name, result,
        )))
        .map(Some)
    }

    /// Close the current session: stamp `endTime`, clear the pointer,
    /// then enforce retention. Returns `false` when there was nothing to
    /// close.
    pub fn finish_session(&self) -> Result<bool> {
        let Some(id) = self.pointer.get() else {
            return Ok(false);
        };

        if self.storage.load_session(&id).is_none() {
            // stale pointer: the session is gone, nothing to stamp
            self.pointer.clear()?;
            return Ok(false);
        }

        self.storage.update_session(&id, |mut session| {
            if session.end_time.is_none() {
                session.end_time = Some(Utc::now());
            }
            session
        })?;
        self.pointer.clear()?;

        self.storage.prune_sessions(self.config.retention_days)?;
        Ok(true)
    }

    /// Append one entry to the current session, creating one when none
    /// resolves.
    fn append(&self, entry: SessionEntry) -> Result<String> {
        if let Some(id) = self.pointer.get() {
            if self.storage.load_session(&id).is_some() {
                self.storage.update_session(&id, move |mut session| {
                    entry.apply_to(&mut session);
                    session
                })?;
                return Ok(id);
            }
            // stale pointer: fall through and start a fresh session
        }

        self.storage.ensure_dir()?;
        let id = self.storage.allocate_session_id();

        match self.pointer.set_if_vacant(&id)? {
            None => {
                // claimed: first file written for this id already holds
                // the entry
                self.storage.create_session_with(&id, entry)?;
                Ok(id)
            }
            Some(winner) if self.storage.load_session(&winner).is_some() => {
                // lost a first-append race: converge on the winner
                self.storage.update_session(&winner, move |mut session| {
                    entry.apply_to(&mut session);
                    session
                })?;
                Ok(winner)
            }
            Some(_stale) => {
                // the pointer holds an id with no live file: replace it
                self.pointer.set(&id)?;
                self.storage.create_session_with(&id, entry)?;
                Ok(id)
            }
        }
    }
}
