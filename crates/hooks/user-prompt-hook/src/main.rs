//! UserPromptSubmit hook: record the submitted prompt.
//!
//! Appends one prompt entry to the current session, creating the session
//! first when none is open. A payload without prompt text is recorded
//! nowhere and the hook exits silently.

use anyhow::Result;
use hook_common::prelude::*;
use hook_common::report;
use recorder_core::Recorder;

const HOOK_NAME: &str = "user-prompt-hook";

fn main() {
    if let Err(err) = run() {
        report::fail(err);
    }
}

fn run() -> Result<()> {
    let input = HookInput::from_stdin()?;

    let Some(prompt) = input.prompt() else {
        DebugLog::new(HOOK_NAME, "skipped")
            .with_detail("no prompt text")
            .write();
        return Ok(());
    };

    let recorder = Recorder::open(&config_path())?;
    let session_id = recorder.record_prompt(prompt)?;

    DebugLog::new(HOOK_NAME, "recorded")
        .with_session(session_id)
        .with_detail(prompt)
        .write();

    Ok(())
}
