//! Configuration parsing and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the pocketwiki.yml schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default = "default_entries_dir")]
    pub entries_dir: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_site_title() -> String {
    String::from("pocketwiki")
}

fn default_entries_dir() -> PathBuf {
    PathBuf::from("entries")
}

fn default_listen_addr() -> String {
    String::from("127.0.0.1:8000")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            entries_dir: default_entries_dir(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// absent. Parse errors still surface.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(?path, "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.site.title, "pocketwiki");
        assert_eq!(config.entries_dir, PathBuf::from("entries"));
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: Config = serde_yaml::from_str(
            r#"
site:
  title: "My Wiki"
entries_dir: "pages"
"#,
        )
        .unwrap();
        assert_eq!(config.site.title, "My Wiki");
        assert_eq!(config.entries_dir, PathBuf::from("pages"));
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.site.title, "pocketwiki");
    }
}
