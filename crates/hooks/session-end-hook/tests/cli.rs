//! End-to-end tests driving the real binary with env-isolated plugin
//! roots.

use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::str::contains;
use recorder_core::{Recorder, RecorderConfig};
use std::fs;
use std::path::Path;

fn hook() -> Command {
    Command::cargo_bin("session-end-hook").unwrap()
}

fn write_config(root: &Path) -> Utf8PathBuf {
    let config_path = Utf8PathBuf::from_path_buf(
        root.join("config").join("recorder-config.json"),
    )
    .unwrap();
    RecorderConfig::default().save(&config_path).unwrap();
    config_path
}

#[test]
fn closes_current_session_and_clears_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path());

    // open a session the way the other hooks do
    let recorder = Recorder::open(&config_path).unwrap();
    let id = recorder.record_prompt("hello").unwrap();
    drop(recorder);

    hook()
        .env("CLAUDE_PLUGIN_ROOT", dir.path())
        .assert()
        .success()
        .stdout("");

    let session_path = dir
        .path()
        .join("sessions")
        .join(format!("conversation-{id}.json"));
    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(session_path).unwrap()).unwrap();
    assert!(session["endTime"].is_string());
    assert_eq!(session["prompts"][0]["text"], "hello");

    assert!(!dir.path().join(".current-session").exists());
}

#[test]
fn next_prompt_after_close_opens_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(dir.path());

    let recorder = Recorder::open(&config_path).unwrap();
    let first = recorder.record_prompt("hello").unwrap();

    hook()
        .env("CLAUDE_PLUGIN_ROOT", dir.path())
        .assert()
        .success();

    let second = recorder.record_prompt("again").unwrap();
    assert_ne!(first, second);
}

#[test]
fn no_current_session_is_silent_noop() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());

    hook()
        .env("CLAUDE_PLUGIN_ROOT", dir.path())
        .assert()
        .success()
        .stdout("");

    // nothing created
    assert!(!dir.path().join("sessions").exists());
    assert!(!dir.path().join(".current-session").exists());
}

#[test]
fn stale_pointer_is_cleared_without_error() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    fs::write(dir.path().join(".current-session"), "ghost").unwrap();

    hook()
        .env("CLAUDE_PLUGIN_ROOT", dir.path())
        .assert()
        .success();

    assert!(!dir.path().join(".current-session").exists());
}

#[test]
fn missing_config_fails_with_json_report() {
    let dir = tempfile::tempdir().unwrap();

    hook()
        .env("CLAUDE_PLUGIN_ROOT", dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains(r#"{"error":"#));
}
