//! Plugin-root and config path resolution.

use camino::Utf8PathBuf;
use std::env;

/// Environment variable the host sets to the plugin's install directory.
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

/// Resolve the plugin root directory.
///
/// Uses `CLAUDE_PLUGIN_ROOT` when set, falling back to the current working
/// directory.
pub fn plugin_root() -> Utf8PathBuf {
    if let Ok(root) = env::var(PLUGIN_ROOT_ENV) {
        if !root.is_empty() {
            return Utf8PathBuf::from(root);
        }
    }

    env::current_dir()
        .ok()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("."))
}

/// Path of the recorder configuration file under the plugin root.
pub fn config_path() -> Utf8PathBuf {
    plugin_root().join("config").join("recorder-config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_under_root() {
        let path = config_path();
        assert!(path.as_str().ends_with("config/recorder-config.json"));
    }
}
