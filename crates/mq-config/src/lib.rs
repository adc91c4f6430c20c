//! Configuration management for mq.
//!
//! Parses `mq.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `html.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mq.toml";

/// Largest number of answer slots the paper quiz header supports.
pub const MAX_ANSWER_SLOTS: usize = 26;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output format.
    pub format: Option<String>,
    /// Override base URL of the shared assets.
    pub base_url: Option<String>,
    /// Override HTML page layout.
    pub layout: Option<String>,
    /// Override number of paper answer slots.
    pub answer_slots: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub html: HtmlConfig,
    pub tex: TexConfig,
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// URL prefix of `mathquiz.css` and `mathquiz.js`.
    pub base_url: String,
    /// Page layout name.
    pub layout: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            base_url: "/MathQuiz/".to_owned(),
            layout: "standard".to_owned(),
        }
    }
}

/// Paper quiz configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TexConfig {
    pub answer_slots: usize,
}

impl Default for TexConfig {
    fn default() -> Self {
        Self { answer_slots: 4 }
    }
}

/// Output selection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format name.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "html".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`html.base_url`").
        field: String,
        /// Error message (e.g., "${`MQ_ASSETS`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Make a base URL end with exactly one `/`. An empty URL stays empty so
/// that assets resolve relative to the page.
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        if url.is_empty() {
            String::new()
        } else {
            "/".to_owned()
        }
    } else {
        format!("{trimmed}/")
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mq.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The merged result is normalized
    /// and validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
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

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(format) = &settings.format {
            self.output.format.clone_from(format);
        }
        if let Some(base_url) = &settings.base_url {
            self.html.base_url.clone_from(base_url);
        }
        if let Some(layout) = &settings.layout {
            self.html.layout.clone_from(layout);
        }
        if let Some(answer_slots) = settings.answer_slots {
            self.tex.answer_slots = answer_slots;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
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
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn normalize(&mut self) {
        self.html.base_url = normalize_base_url(&self.html.base_url);
        self.html.layout = self.html.layout.trim().to_owned();
        self.output.format = self.output.format.trim().to_owned();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.html.layout, "html.layout")?;
        require_non_empty(&self.output.format, "output.format")?;

        let slots = self.tex.answer_slots;
        if slots == 0 {
            return Err(ConfigError::Validation(
                "tex.answer_slots must be greater than 0".to_owned(),
            ));
        }
        if slots > MAX_ANSWER_SLOTS {
            return Err(ConfigError::Validation(format!(
                "tex.answer_slots cannot exceed {MAX_ANSWER_SLOTS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.html.base_url = expand::expand_env(&self.html.base_url, "html.base_url")?;
        Ok(())
    }
}
