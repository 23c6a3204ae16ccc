//! The full recording flow across independent invocations.
//!
//! Each `Recorder::open` models a fresh hook process: no state is
//! carried in memory, everything is rehydrated from disk.

use camino::Utf8PathBuf;
use recorder_core::{Recorder, RecorderConfig, SessionManager, SessionStorage};
use std::fs;

fn plugin_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

fn setup(dir: &tempfile::TempDir) -> Utf8PathBuf {
    let config_path = plugin_root(dir).join("config").join("recorder-config.json");
    RecorderConfig::default().save(&config_path).unwrap();
    config_path
}

#[test]
fn prompt_then_tool_result_then_end() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let root = plugin_root(&dir);

    // prompt-submit hook fires with no session open
    let id = {
        let recorder = Recorder::open(&config_path).unwrap();
        recorder.record_prompt("hello").unwrap()
    };

    let session_file = root
        .join("sessions")
        .join(format!("conversation-{id}.json"));
    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&session_file).unwrap()).unwrap();
    assert_eq!(session["prompts"][0]["text"], "hello");
    assert_eq!(session["responses"].as_array().unwrap().len(), 0);
    assert!(session["endTime"].is_null());

    // tool-result hook fires in a separate process
    {
        let recorder = Recorder::open(&config_path).unwrap();
        let appended = recorder.record_tool_result("Bash", "ok").unwrap();
        assert_eq!(appended.as_deref(), Some(id.as_str()));
    }

    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&session_file).unwrap()).unwrap();
    assert_eq!(session["prompts"].as_array().unwrap().len(), 1);
    assert_eq!(session["responses"][0]["type"], "tool");
    assert_eq!(session["responses"][0]["toolName"], "Bash");
    assert_eq!(session["responses"][0]["result"], "ok");

    // session-end hook fires in a third process
    {
        let recorder = Recorder::open(&config_path).unwrap();
        assert!(recorder.finish_session().unwrap());
    }

    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&session_file).unwrap()).unwrap();
    assert!(session["endTime"].is_string());
    assert!(!root.join(".current-session").exists());

    // the next prompt opens a brand-new session with a different id
    let next = {
        let recorder = Recorder::open(&config_path).unwrap();
        recorder.record_prompt("new conversation").unwrap()
    };
    assert_ne!(next, id);

    let storage = SessionStorage::new(root.join("sessions"));
    let sessions = storage.list_sessions().unwrap();
    assert_eq!(sessions.len(), 2);
    // newest first
    assert_eq!(sessions[0].session_id, next);
}

#[test]
fn manager_and_recorder_share_the_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);

    // a session opened through the recorder path...
    let recorder = Recorder::open(&config_path).unwrap();
    let id = recorder.record_prompt("hello").unwrap();

    // ...is the session the manager path sees as current
    let config = RecorderConfig::load(&config_path).unwrap();
    let mut manager = SessionManager::from_config(&config, &config_path);
    let current = manager.current_session().unwrap();
    assert_eq!(current.session_id, id);

    // and a close through the manager is visible to the recorder
    manager.end_session().unwrap();
    assert!(!recorder.finish_session().unwrap());
}
