use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, WishlistError};
use crate::render::ViewMode;

/// Global wishlist configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the wishlist API (without the `/api` suffix)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Full URL of the service-status endpoint
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// Name of the list owner, used in claim messages
    #[serde(default = "default_owner_name")]
    pub owner_name: String,

    /// Refresh interval of the owner view in seconds
    #[serde(default = "default_owner_poll")]
    pub owner_poll_secs: u64,

    /// Refresh interval of the public claim view in seconds
    #[serde(default = "default_public_poll")]
    pub public_poll_secs: u64,

    /// Timeout for wishlist API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Hard timeout for the status check in seconds
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,

    /// Services shown by `wishlist status`; empty shows everything reported
    #[serde(default)]
    pub services: Vec<String>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_status_url() -> String {
    "http://localhost:8082/status".to_string()
}

fn default_owner_name() -> String {
    "the list owner".to_string()
}

fn default_owner_poll() -> u64 {
    30
}

fn default_public_poll() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_status_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            status_url: default_status_url(),
            owner_name: default_owner_name(),
            owner_poll_secs: default_owner_poll(),
            public_poll_secs: default_public_poll(),
            request_timeout_secs: default_request_timeout(),
            status_timeout_secs: default_status_timeout(),
            services: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// `WISHLIST_API_URL` overrides the configured API URL.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("WISHLIST_API_URL") {
            config.api_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url)
            .map_err(|e| WishlistError::ConfigError(format!("Invalid api_url '{}': {}", self.api_url, e)))?;
        if self.owner_poll_secs == 0 || self.public_poll_secs == 0 {
            return Err(WishlistError::ConfigError(
                "Poll intervals must be at least one second".into(),
            ));
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports WISHLIST_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("WISHLIST_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "wishlist")
            .ok_or_else(|| WishlistError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "wishlist")
            .ok_or_else(|| WishlistError::ConfigError("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Refresh interval for a view
    pub fn poll_interval(&self, mode: ViewMode) -> Duration {
        match mode {
            ViewMode::Owner => Duration::from_secs(self.owner_poll_secs),
            ViewMode::Public { .. } => Duration::from_secs(self.public_poll_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}
