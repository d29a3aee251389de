use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::taxonomy::{Blacklist, DEFAULT_BLACKLIST, Separators, Taxonomy};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Locale used when the visitor has no `lang` cookie.
    #[serde(default = "default_language")]
    pub language: String,
    /// Books per page in list responses.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyConfig {
    /// Characters that split a raw category into hierarchy parts.
    #[serde(default = "default_separators")]
    pub separators: String,
    /// Tags dropped from every tag set and the category index.
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
}

impl From<&TaxonomyConfig> for Taxonomy {
    fn from(cfg: &TaxonomyConfig) -> Self {
        Taxonomy::new(
            Separators::new(cfg.separators.chars()),
            Blacklist::new(&cfg.blacklist),
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            page_size: default_page_size(),
        }
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            separators: default_separators(),
            blacklist: default_blacklist(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.web.page_size == 0 {
            return Err(ConfigError::Invalid(
                "web.page_size must be at least 1".to_string(),
            ));
        }
        if self.taxonomy.separators.is_empty() {
            return Err(ConfigError::Invalid(
                "taxonomy.separators must not be empty".to_string(),
            ));
        }
        if self.taxonomy.separators.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "taxonomy.separators must not contain whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// Default value functions

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_db_url() -> String {
    "sqlite://buchkatalog.db".to_string()
}

fn default_language() -> String {
    "de".to_string()
}

fn default_page_size() -> u32 {
    24
}

fn default_separators() -> String {
    Separators::default().as_string()
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect()
}
