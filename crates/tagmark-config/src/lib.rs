//! Configuration management for tagmark.
//!
//! Parses `tagmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Caller settings can be applied during load via [`RenderOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `assets.base_url`
//!
//! ## Named Data
//!
//! Tables under `[data]` become named data sets that directives can reference
//! by name (for example a table directive's `rows` attribute):
//!
//! ```toml
//! [data.team]
//! rows = [["Name", "Role"], ["Ann", "Lead"]]
//! ```

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct RenderOverrides {
    /// Override maximum nesting depth.
    pub max_depth: Option<usize>,
    /// Override heading id generation.
    pub heading_ids: Option<bool>,
    /// Override GFM extensions for prose.
    pub gfm: Option<bool>,
    /// Override base URL for relative asset paths.
    pub asset_base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tagmark.toml";

/// Upper bound accepted for `render.max_depth`.
const MAX_DEPTH_LIMIT: usize = 256;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Asset configuration.
    pub assets: AssetsConfig,
    /// Named data sets reachable by directives.
    pub data: HashMap<String, serde_json::Value>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum nesting depth for directive bodies.
    pub max_depth: usize,
    /// Emit slug ids on headings.
    pub heading_ids: bool,
    /// Enable GitHub Flavored Markdown extensions for prose.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            heading_ids: false,
            gfm: true,
        }
    }
}

/// Asset configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Prefix for relative media paths (e.g. `/static` or a CDN URL).
    pub base_url: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.base_url`").
        field: String,
        /// Error message (e.g., "${`ASSET_URL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tagmark.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&RenderOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Environment variables are expanded and the result is validated.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(max_depth) = overrides.max_depth {
            self.render.max_depth = max_depth;
        }
        if let Some(heading_ids) = overrides.heading_ids {
            self.render.heading_ids = heading_ids;
        }
        if let Some(gfm) = overrides.gfm {
            self.render.gfm = gfm;
        }
        if let Some(base_url) = &overrides.asset_base_url {
            self.assets.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.max_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_depth must be greater than 0".to_owned(),
            ));
        }
        if self.render.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        if let Some(base_url) = &self.assets.base_url
            && base_url.is_empty()
        {
            return Err(ConfigError::Validation(
                "assets.base_url cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.assets.base_url {
            self.assets.base_url = Some(expand::expand_env(url, "assets.base_url")?);
        }
        Ok(())
    }
}
