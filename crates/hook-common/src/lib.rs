//! Common plumbing for the conversation-recorder hooks.
//!
//! This crate provides the pieces every hook binary shares:
//! - JSON input parsing from stdin
//! - Structured failure reporting on stderr
//! - Opt-in debug logging
//! - Plugin-root and config path resolution

pub mod debug;
pub mod input;
pub mod paths;
pub mod report;

pub use debug::DebugLog;
pub use input::HookInput;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::debug::DebugLog;
    pub use crate::input::HookInput;
    pub use crate::paths::{config_path, plugin_root};
    pub use anyhow::{Context, Result};
    pub use serde::{Deserialize, Serialize};
}
