use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub export_path: String,
    pub request_timeout_secs: u64,
    pub voice: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            export_path: "./case_evidence_log.txt".into(),
            request_timeout_secs: 30,
            voice: false,
        }
    }
}

/// Defaults, overridden by `console.toml` (or an explicit path), overridden
/// by environment variables. CLI flags are applied on top by the caller.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new("console.toml"));
    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => warn!("ignoring unparseable config {}: {err}", path.display()),
        }
    }

    if let Ok(v) = std::env::var("CONSOLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("CONSOLE_EXPORT_PATH") {
        settings.export_path = v;
    }
    if let Ok(v) = std::env::var("CONSOLE_REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}
