//! SessionEnd hook: close the current session.
//!
//! Stamps `endTime` on the current session, clears the pointer so the
//! next append opens a fresh session, and enforces the retention policy.
//! The SessionEnd event carries no payload, so stdin is not read.

use anyhow::Result;
use hook_common::DebugLog;
use hook_common::paths::config_path;
use hook_common::report;
use recorder_core::Recorder;

const HOOK_NAME: &str = "session-end-hook";

fn main() {
    if let Err(err) = run() {
        report::fail(err);
    }
}

fn run() -> Result<()> {
    let recorder = Recorder::open(&config_path())?;

    if recorder.finish_session()? {
        DebugLog::new(HOOK_NAME, "closed").write();
    } else {
        DebugLog::new(HOOK_NAME, "skipped")
            .with_detail("no current session")
            .write();
    }

    Ok(())
}
