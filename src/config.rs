use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECONDS, ONESOCCER_PAGE_URL, SPORTSNET_EVENTS_URL, TSN_SCHEDULE_URL,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
///
/// All three upstream endpoints default to the real public APIs and exist
/// in the config mainly so tests (and the occasional proxy setup) can point
/// a source somewhere else.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// TSN schedule endpoint
    #[serde(default = "default_tsn_schedule_url")]
    pub tsn_schedule_url: String,
    /// Sportsnet events endpoint (windowed with day_start/day_end)
    #[serde(default = "default_sportsnet_events_url")]
    pub sportsnet_events_url: String,
    /// OneSoccer page-content endpoint (queried with path=/)
    #[serde(default = "default_onesoccer_page_url")]
    pub onesoccer_page_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_tsn_schedule_url() -> String {
    TSN_SCHEDULE_URL.to_string()
}

fn default_sportsnet_events_url() -> String {
    SPORTSNET_EVENTS_URL.to_string()
}

fn default_onesoccer_page_url() -> String {
    ONESOCCER_PAGE_URL.to_string()
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tsn_schedule_url: default_tsn_schedule_url(),
            sportsnet_events_url: default_sportsnet_events_url(),
            onesoccer_page_url: default_onesoccer_page_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, falling
    /// back to built-in defaults when no file exists. Environment variables
    /// override either.
    ///
    /// # Environment Variables
    /// - `ONAIR_LOG_FILE` - Override log file path
    /// - `ONAIR_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    pub async fn load() -> Result<Self, AppError> {
        let config_path = Config::get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        if let Ok(log_file_path) = std::env::var("ONAIR_LOG_FILE") {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("ONAIR_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        Ok(config)
    }

    /// Loads configuration from a specific file path
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves current configuration to the default config file location
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&Config::get_config_path()).await
    }

    /// Saves current configuration to a specific file path, creating the
    /// parent directory if needed
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Returns the platform-specific path for the config file.
    /// Falls back to the current directory if no config directory is available.
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("onair")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific path for the log directory
    pub fn get_log_dir_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("onair")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }

    /// Prints the current configuration to stdout
    pub async fn display() -> Result<(), AppError> {
        let config_path = Config::get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("TSN schedule URL:\n{}", config.tsn_schedule_url);
            println!("Sportsnet events URL:\n{}", config.sportsnet_events_url);
            println!("OneSoccer page URL:\n{}", config.onesoccer_page_url);
            println!(
                "Log file:\n{}",
                config.log_file_path.as_deref().unwrap_or("(default)")
            );
            println!("HTTP timeout: {}s", config.http_timeout_seconds);
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Built-in defaults are in effect.");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir
            .path()
            .join("config.toml")
            .to_string_lossy()
            .to_string();

        let config = Config {
            tsn_schedule_url: "http://localhost:9000/tsn".to_string(),
            log_file_path: Some("/tmp/onair.log".to_string()),
            http_timeout_seconds: 5,
            ..Config::default()
        };
        config.save_to_path(&path).await.expect("saves");

        let loaded = Config::load_from_path(&path).await.expect("loads");
        assert_eq!(loaded.tsn_schedule_url, "http://localhost:9000/tsn");
        assert_eq!(loaded.sportsnet_events_url, SPORTSNET_EVENTS_URL);
        assert_eq!(loaded.log_file_path.as_deref(), Some("/tmp/onair.log"));
        assert_eq!(loaded.http_timeout_seconds, 5);
    }

    #[tokio::test]
    async fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "http_timeout_seconds = 10\n")
            .await
            .expect("writes");

        let loaded = Config::load_from_path(&path.to_string_lossy())
            .await
            .expect("loads");
        assert_eq!(loaded.http_timeout_seconds, 10);
        assert_eq!(loaded.tsn_schedule_url, TSN_SCHEDULE_URL);
        assert_eq!(loaded.onesoccer_page_url, ONESOCCER_PAGE_URL);
        assert!(loaded.log_file_path.is_none());
    }
}
