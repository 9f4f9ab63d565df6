//! Site configuration
//!
//! Loaded once from a JSON file at startup, validated, then shared read-only
//! behind an `Arc`. Every key has a default so an empty object is a valid
//! configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates::{DateFormat, SUPPORTED_LOCALE};
use crate::http_server::HttpServerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// On/off switch for a site section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionToggle {
    /// Missing means disabled
    #[serde(default)]
    pub enabled: bool,
}

/// Where content lives and how failures are treated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Strict: one invalid record fails the load. Lenient: it is excluded.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content")
}

fn default_strict() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            strict: default_strict(),
        }
    }
}

/// Site configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public site URL
    #[serde(default = "default_site")]
    pub site: String,

    #[serde(default)]
    pub blog: SectionToggle,

    #[serde(default)]
    pub dates: DateFormat,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_site() -> String {
    "http://localhost:4321".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            blog: SectionToggle::default(),
            dates: DateFormat::default(),
            content: ContentConfig::default(),
            server: HttpServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dates.locale != SUPPORTED_LOCALE {
            return Err(ConfigError::Invalid(format!(
                "unsupported dates.locale '{}'; only '{}' is available",
                self.dates.locale, SUPPORTED_LOCALE
            )));
        }

        url::Url::parse(&self.site)
            .map_err(|e| ConfigError::Invalid(format!("site '{}' is not a URL: {}", self.site, e)))?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".into()));
        }

        Ok(())
    }

    /// Content directory, resolved against `base` when relative
    pub fn content_dir(&self, base: &Path) -> PathBuf {
        if self.content.dir.is_absolute() {
            self.content.dir.clone()
        } else {
            base.join(&self.content.dir)
        }
    }

    /// Pretty JSON used by `folio init`
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
