use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_DELAY_MS: u64 = 50;
const DEFAULT_MAX_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the component-data service.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Directory of per-component JSON snapshots, used when no remote is set.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub initial_delay_ms: Option<u64>,
    #[serde(default)]
    pub max_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("BOARDKIT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/boardkit/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("boardkit/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("boardkit\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

impl RetryConfig {
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1)
    }

    pub fn effective_initial_delay_ms(&self) -> u64 {
        self.initial_delay_ms.unwrap_or(DEFAULT_INITIAL_DELAY_MS)
    }

    pub fn effective_max_delay_ms(&self) -> u64 {
        self.max_delay_ms
            .unwrap_or(DEFAULT_MAX_DELAY_MS)
            .max(self.effective_initial_delay_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_request_timeout_secs(), 10);
        assert_eq!(config.retry.effective_max_attempts(), 3);
        assert_eq!(config.retry.effective_initial_delay_ms(), 50);
        assert_eq!(config.retry.effective_max_delay_ms(), 1000);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
remote_url = "http://localhost:4000/api"
request_timeout_secs = 3

[retry]
max_attempts = 5
initial_delay_ms = 10
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(
            config.remote_url.as_deref(),
            Some("http://localhost:4000/api")
        );
        assert_eq!(config.effective_request_timeout_secs(), 3);
        assert_eq!(config.retry.effective_max_attempts(), 5);
        assert_eq!(config.retry.effective_initial_delay_ms(), 10);
        assert_eq!(config.retry.effective_max_delay_ms(), 1000);
    }

    #[test]
    fn test_unparseable_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "remote_url = [not toml").unwrap();

        let config = AppConfig::load_from(&path);
        assert!(config.remote_url.is_none());
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let retry = RetryConfig {
            max_attempts: Some(0),
            ..Default::default()
        };
        assert_eq!(retry.effective_max_attempts(), 1);
    }
}
