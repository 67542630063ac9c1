//! YAML configuration.
//!
//! ```yaml
//! template: template.md
//! output: README.md
//! feeds:
//!   - https://example.com/feed.xml
//!   - https://blog.example.org/atom.xml
//! ```
//!
//! All three keys are required. Relative paths resolve against the current
//! working directory.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Run configuration loaded from `config.yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Path to the header/footer template file.
    pub template: PathBuf,
    /// Path the rendered digest is written to.
    pub output: PathBuf,
    /// Feed sources, fetched in this order.
    pub feeds: Vec<String>,
}

impl Config {
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read and parse the configuration file at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let config = Config::from_yaml(path, &yaml)?;

    if config.feeds.is_empty() {
        warn!("No feeds configured; the digest will only contain the template");
    }
    info!(feeds = config.feeds.len(), "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
template: template.md
output: out/README.md
feeds:
  - https://example.com/feed.xml
  - feeds/local.xml
"#;

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml(Path::new("config.yaml"), YAML).unwrap();
        assert_eq!(config.template, PathBuf::from("template.md"));
        assert_eq!(config.output, PathBuf::from("out/README.md"));
        assert_eq!(
            config.feeds,
            vec!["https://example.com/feed.xml", "feeds/local.xml"]
        );
    }

    #[test]
    fn test_from_yaml_ignores_unknown_keys() {
        let yaml = format!("{YAML}title: extra\n");
        assert!(Config::from_yaml(Path::new("config.yaml"), &yaml).is_ok());
    }

    #[test]
    fn test_from_yaml_missing_key() {
        let err = Config::from_yaml(Path::new("config.yaml"), "template: t.md\nfeeds: []\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("output"));
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = Config::from_yaml(Path::new("config.yaml"), "feeds: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "template: t.md\noutput: o.md\nfeeds: []\n")
            .await
            .unwrap();

        let config = load_config(&path).await.unwrap();
        assert!(config.feeds.is_empty());
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("config.yaml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
