//! Persisted application settings.
//!
//! One JSON file under the platform config dir, the analogue of the web
//! app's single local-storage key. Loading is forgiving: a missing or
//! malformed file yields defaults, and a partial file is merged with
//! defaults per field. There is no schema versioning and no validation of
//! the URL or token beyond what the CLI layer normalizes on the way in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The memo endpoint used when no settings file exists yet.
pub const DEFAULT_API_URL: &str = "https://memos.apidocumentation.com/api/v1/memos";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_auto_upload() -> bool {
    true
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Full memo endpoint, e.g. `https://host/api/v1/memos`.
    #[serde(default = "default_api_url")]
    pub memos_api_url: String,
    /// Full `Authorization` header value, `Bearer ` prefix included.
    /// Empty means unconfigured.
    #[serde(default)]
    pub memos_token: String,
    /// Upload automatically after a successful compression.
    #[serde(default = "default_auto_upload")]
    pub auto_upload: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            memos_api_url: default_api_url(),
            memos_token: String::new(),
            auto_upload: default_auto_upload(),
        }
    }
}

/// A partial settings change; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub memos_api_url: Option<String>,
    pub memos_token: Option<String>,
    pub auto_upload: Option<bool>,
}

impl Settings {
    /// Load from `path`. Absent or unreadable files yield defaults; a
    /// malformed file is logged and also yields defaults; a partial file is
    /// merged with defaults via the per-field serde defaults.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "settings file is malformed; using defaults");
                Self::default()
            }
        }
    }

    /// Write the whole object back as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Shallow merge: set fields present in `update`, keep the rest.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(url) = &update.memos_api_url {
            self.memos_api_url = url.clone();
        }
        if let Some(token) = &update.memos_token {
            self.memos_token = token.clone();
        }
        if let Some(auto) = update.auto_upload {
            self.auto_upload = auto;
        }
    }

    /// Both the endpoint and the token are present.
    pub fn is_configured(&self) -> bool {
        !self.memos_api_url.is_empty() && !self.memos_token.is_empty()
    }

    /// Token for display: scheme kept, payload elided.
    pub fn redacted_token(&self) -> String {
        if self.memos_token.is_empty() {
            return "(not set)".to_string();
        }
        match self.memos_token.split_once(' ') {
            Some((scheme, _)) => format!("{} ********", scheme),
            None => "********".to_string(),
        }
    }
}

/// Default location for the settings file, e.g.
/// `~/.config/memopress/settings.json`.
pub fn default_settings_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memopress")
        .join("settings.json")
}

/// Assemble the full memo endpoint from a bare domain. Any scheme the user
/// typed is stripped first.
pub fn api_url_from_domain(domain: &str) -> String {
    let host = domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{}/api/v1/memos", host)
}

/// Ensure the stored token carries its `Bearer ` prefix.
pub fn normalize_token(token: &str) -> String {
    let token = token.trim();
    if token.is_empty() || token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.memos_api_url, DEFAULT_API_URL);
        assert!(settings.auto_upload);
        assert!(!settings.is_configured());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "memos_token": "Bearer abc" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.memos_token, "Bearer abc");
        assert_eq!(settings.memos_api_url, DEFAULT_API_URL);
        assert!(settings.auto_upload);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("settings.json");
        let mut settings = Settings::default();
        settings.memos_api_url = "https://m.example.com/api/v1/memos".to_string();
        settings.memos_token = "Bearer xyz".to_string();
        settings.auto_upload = false;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn apply_is_a_shallow_merge_and_idempotent() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            memos_token: Some("Bearer abc".to_string()),
            ..SettingsUpdate::default()
        };
        settings.apply(&update);
        let once = settings.clone();
        settings.apply(&update);
        assert_eq!(settings, once);
        assert_eq!(settings.memos_api_url, DEFAULT_API_URL);
        assert_eq!(settings.memos_token, "Bearer abc");
    }

    #[test]
    fn api_url_assembly_strips_scheme() {
        assert_eq!(
            api_url_from_domain("memos.example.com"),
            "https://memos.example.com/api/v1/memos"
        );
        assert_eq!(
            api_url_from_domain("https://memos.example.com/"),
            "https://memos.example.com/api/v1/memos"
        );
    }

    #[test]
    fn token_normalization_adds_bearer_once() {
        assert_eq!(normalize_token("abc"), "Bearer abc");
        assert_eq!(normalize_token("Bearer abc"), "Bearer abc");
        assert_eq!(normalize_token("  "), "");
    }

    #[test]
    fn redaction_never_shows_the_payload() {
        let mut settings = Settings::default();
        assert_eq!(settings.redacted_token(), "(not set)");
        settings.memos_token = "Bearer supersecret".to_string();
        let shown = settings.redacted_token();
        assert!(shown.contains("Bearer"));
        assert!(!shown.contains("supersecret"));
    }
}
