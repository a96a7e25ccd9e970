//! Client configuration.
//!
//! Settings live in `<config_dir>/draftdesk/settings.json`. A missing file
//! means defaults; `DRAFTDESK_HOST` and `DRAFTDESK_PORT` override the
//! backend address.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding the backend host.
pub const HOST_ENV: &str = "DRAFTDESK_HOST";

/// Environment variable overriding the backend port.
pub const PORT_ENV: &str = "DRAFTDESK_PORT";

/// Address of the draft backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// URL scheme (default: `http`).
    pub scheme: String,
    /// Backend hostname.
    pub host: String,
    /// Backend port.
    pub port: u16,
    /// Per-request timeout in seconds. `None` leaves timeouts to the transport.
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 8000,
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// Base URL that endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.scheme, self.host, self.port)
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend address.
    pub backend: BackendConfig,
    /// Maximum number of emails shown in the triage list.
    pub inbox_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            inbox_limit: 10,
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftdesk")
            .join("settings.json")
    }

    /// Load settings from a file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save settings to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Apply `DRAFTDESK_HOST` / `DRAFTDESK_PORT` from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is not a valid number.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(std::env::var(HOST_ENV).ok(), std::env::var(PORT_ENV).ok())
    }

    fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.backend.host = host.trim().to_string();
        }

        if let Some(port) = port {
            self.backend.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{PORT_ENV} is not a valid port: {port}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            BackendConfig::default().base_url(),
            "http://localhost:8000/"
        );
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"backend":{"port":9000}}"#).unwrap();

        assert_eq!(settings.backend.host, "localhost");
        assert_eq!(settings.backend.port, 9000);
        assert_eq!(settings.inbox_limit, 10);
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(Some("api.internal".into()), Some(" 8080 ".into()))
            .unwrap();

        assert_eq!(settings.backend.base_url(), "http://api.internal:8080/");
    }

    #[test]
    fn test_blank_host_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some("  ".into()), None).unwrap();
        assert_eq!(settings.backend.host, "localhost");
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(None, Some("eighty".into()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("draftdesk-missing-settings.json");
        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("draftdesk-settings-{}", std::process::id()));
        let path = dir.join("settings.json");

        let mut settings = Settings::default();
        settings.backend.timeout_secs = Some(30);
        settings.save(&path).await.unwrap();

        let loaded = Settings::load(&path).await.unwrap();
        assert_eq!(loaded.backend.timeout(), Some(Duration::from_secs(30)));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
