//! Structured failure reporting on stderr.
//!
//! A failed hook signals the host through its exit code; the only detail
//! channel is a JSON object on stderr. Success produces no output here.

use serde::Serialize;

/// Payload written to stderr when a hook fails.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Top-level error message
    pub error: String,

    /// Underlying cause chain, outermost first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl FailureReport {
    /// Build a report from an error, capturing its source chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let causes: Vec<String> = err.chain().skip(1).map(|c| c.to_string()).collect();
        Self {
            error: err.to_string(),
            stack: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }

    /// Write the report as a single JSON line to stderr.
    pub fn write_stderr(&self) {
        match serde_json::to_string(self) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!(r#"{{"error":"failed to serialize error report"}}"#),
        }
    }
}

/// Report a fatal hook error and exit with status 1.
pub fn fail(err: anyhow::Error) -> ! {
    FailureReport::from_error(&err).write_stderr();
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_report_without_cause() {
        let err = anyhow::anyhow!("config missing");
        let report = FailureReport::from_error(&err);
        assert_eq!(report.error, "config missing");
        assert!(report.stack.is_none());

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"error":"config missing"}"#);
    }

    #[test]
    fn test_report_with_cause_chain() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = anyhow::Error::from(err).context("failed to read config");
        let report = FailureReport::from_error(&err);
        assert_eq!(report.error, "failed to read config");
        assert_eq!(report.stack.as_deref(), Some("no such file"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"stack\""));
    }
}
