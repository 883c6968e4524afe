//! Device-local preferences: theme, add-form layout and claim visibility.
//!
//! These never leave the machine and are not synced with the server.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, WishlistError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    /// Add form asks only for required fields
    #[serde(default)]
    pub form_collapsed: bool,
    /// Public view reveals who claimed each item
    #[serde(default)]
    pub show_claims: bool,
}

impl Preferences {
    /// Load preferences from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| WishlistError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the preferences file path
    ///
    /// Supports WISHLIST_PREFS environment variable for test isolation
    pub fn path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("WISHLIST_PREFS") {
            return Ok(PathBuf::from(path));
        }
        Ok(Config::data_dir()?.join("prefs.toml"))
    }
}
