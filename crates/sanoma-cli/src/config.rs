//! Configuration management for the CLI.
//!
//! Configuration lives in `~/.sanoma/config.toml`; every field has a
//! default so a missing file, or a partial one, is fine:
//!
//! ```toml
//! [settings]
//! color = true
//! format = "table"
//!
//! [analysis]
//! threshold = 0.95
//! pattern = "unsubscribe"
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Defaults for the domain analysis
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// Defaults used when the domains command is run without flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Cumulative coverage to reach, as a fraction
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Content pattern searched in subject and body
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl AnalysisSettings {
    /// Validate the analysis defaults
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_threshold(self.threshold)?;
        if self.pattern.is_empty() {
            return Err("pattern must not be empty".to_string());
        }
        Ok(())
    }
}

/// Check that a coverage threshold lies in (0, 1]
pub fn validate_threshold(threshold: f64) -> std::result::Result<(), String> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(format!("threshold must be in (0, 1], got {}", threshold))
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sanoma").join("config.toml"))
    }

    /// Load configuration from `path`, or the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.analysis.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to `path`, or the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, self.to_toml()?).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            pattern: default_pattern(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_threshold() -> f64 {
    0.95
}

fn default_pattern() -> String {
    "unsubscribe".to_string()
}
