//! Core session/storage management for the conversation recorder.
//!
//! Every hook invocation is a fresh process; the filesystem is the only
//! coordination medium. This crate owns:
//! - the on-disk session schema
//! - configuration load/save
//! - session file CRUD with atomic writes and locked updates
//! - the single current-session pointer
//! - lifecycle orchestration (`SessionManager`) and the hook entry
//!   path (`Recorder`)

pub mod config;
pub mod error;
pub mod manager;
pub mod pointer;
pub mod recorder;
pub mod session;
pub mod storage;

pub use config::RecorderConfig;
pub use error::{RecorderError, Result};
pub use manager::SessionManager;
pub use pointer::SessionPointer;
pub use recorder::Recorder;
pub use session::{PromptEntry, ResponseEntry, Session, SessionEntry, SessionMetadata};
pub use storage::SessionStorage;
