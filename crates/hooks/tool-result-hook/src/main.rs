//! PostToolUse hook: record the tool execution result.
//!
//! Appends one tool-typed response entry to the current session,
//! creating the session first when none is open. Payloads without a
//! tool name or without a result are recorded nowhere and the hook
//! exits silently.

use anyhow::Result;
use hook_common::prelude::*;
use hook_common::report;
use recorder_core::Recorder;

const HOOK_NAME: &str = "tool-result-hook";

fn main() {
    if let Err(err) = run() {
        report::fail(err);
    }
}

fn run() -> Result<()> {
    let input = HookInput::from_stdin()?;

    let (Some(tool_name), Some(result)) = (input.tool(), input.tool_result_text()) else {
        DebugLog::new(HOOK_NAME, "skipped")
            .with_detail("no tool name or result")
            .write();
        return Ok(());
    };

    let recorder = Recorder::open(&config_path())?;
    match recorder.record_tool_result(tool_name, &result)? {
        Some(session_id) => {
            DebugLog::new(HOOK_NAME, "recorded")
                .with_session(session_id)
                .with_detail(tool_name)
                .write();
        }
        None => {
            // includeToolResults is off
            DebugLog::new(HOOK_NAME, "suppressed")
                .with_detail(tool_name)
                .write();
        }
    }

    Ok(())
}
