//! Hook input parsing from stdin.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};

/// Payload received from the host tool on stdin.
///
/// Each lifecycle event fills a different subset of these fields; all of
/// them are optional so that one struct covers every hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// User prompt text (UserPromptSubmit)
    #[serde(default)]
    pub user_prompt: Option<String>,

    /// Name of the tool that just ran (PostToolUse)
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Tool output (PostToolUse); may be any JSON value
    #[serde(default)]
    pub tool_result: Option<serde_json::Value>,

    /// Hook event name, when the host includes it
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Host session ID, when the host includes it
    #[serde(default)]
    pub session_id: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl HookInput {
    /// Read and parse hook input from stdin.
    pub fn from_stdin() -> anyhow::Result<Self> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        let parsed: HookInput = serde_json::from_str(&input)?;
        Ok(parsed)
    }

    /// Get the prompt text, treating an empty string as absent.
    pub fn prompt(&self) -> Option<&str> {
        self.user_prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// Get the tool name, treating an empty string as absent.
    pub fn tool(&self) -> Option<&str> {
        self.tool_name.as_deref().filter(|t| !t.is_empty())
    }

    /// Coerce the tool result to text.
    ///
    /// JSON strings pass through unchanged; every other present value
    /// (including `null`) is rendered as compact JSON. Returns `None` only
    /// when the field is absent from the payload.
    pub fn tool_result_text(&self) -> Option<String> {
        match self.tool_result.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_input() {
        let json = r#"{"hook_event_name": "UserPromptSubmit", "user_prompt": "Hello"}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.prompt(), Some("Hello"));
        assert_eq!(input.hook_event_name.as_deref(), Some("UserPromptSubmit"));
    }

    #[test]
    fn test_empty_prompt_is_absent() {
        let json = r#"{"user_prompt": ""}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.prompt(), None);
    }

    #[test]
    fn test_parse_tool_result_input() {
        let json = r#"{"tool_name": "Bash", "tool_result": "ok"}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tool(), Some("Bash"));
        assert_eq!(input.tool_result_text(), Some("ok".to_string()));
    }

    #[test]
    fn test_tool_result_coercion() {
        let json = r#"{"tool_name": "Bash", "tool_result": {"exit_code": 0}}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input.tool_result_text(),
            Some(r#"{"exit_code":0}"#.to_string())
        );

        let json = r#"{"tool_name": "Bash", "tool_result": null}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tool_result_text(), Some("null".to_string()));
    }

    #[test]
    fn test_absent_tool_result() {
        let json = r#"{"tool_name": "Bash"}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tool_result_text(), None);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let json = r#"{"user_prompt": "hi", "cwd": "/work", "transcript_path": "/tmp/t"}"#;
        let input: HookInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.extra.len(), 2);
        assert_eq!(
            input.extra.get("cwd").and_then(|v| v.as_str()),
            Some("/work")
        );
    }
}
