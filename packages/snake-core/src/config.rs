//! Shell configuration loaded from TOML.

use crate::types::User;
use crate::view::View;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SNAKE_SHELL_CONFIG";

/// Startup configuration of the shell.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Product name; doubles as the default (locked) conversation title
    pub product_name: String,
    /// User admitted when the auth collaborator reports success
    pub demo_user: User,
    /// View shown right after startup
    pub initial_view: View,
    /// Catalog locale; detected from the environment when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            product_name: "SnakeEngine.AI".to_string(),
            demo_user: User::new("Demo User", "demo@snakeengine.ai"),
            initial_view: View::Chat,
            locale: None,
        }
    }
}

impl ShellConfig {
    /// Get the default config file path.
    ///
    /// Default path: `~/.snakeengine/shell.toml`
    /// Can be overridden with the `SNAKE_SHELL_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".snakeengine/shell.toml"))
            .unwrap_or_else(|| PathBuf::from("shell.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
