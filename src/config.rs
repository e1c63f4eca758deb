//! Configuration loading and parsing for `changelog-hub.toml` files, and the
//! resolved configuration handed to every component of a run.
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::{
    Result,
    forge::{
        config::{
            DEFAULT_BRANCH, DEFAULT_CHANGELOG_PATH, DEFAULT_RAW_BASE_URL,
            DEFAULT_TIMEOUT_SECS, RemoteConfig,
        },
        types::RepositoryId,
    },
    render::DEFAULT_TITLE,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "changelog-hub.toml";
/// Default local output path and object key.
pub const DEFAULT_OUTPUT_FILE: &str = "index.html";
/// Default storage region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where changelogs are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root of the raw content host.
    pub base_url: String,
    /// Branch the changelog is read from.
    pub branch: String,
    /// Changelog path relative to the repository root.
    pub changelog_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAW_BASE_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            changelog_path: DEFAULT_CHANGELOG_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Where the rendered page is written locally.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Storage table of the config file. Credentials are never read from the
/// file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageFileConfig {
    pub bucket: Option<String>,
    pub region: String,
    pub key: String,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl Default for StorageFileConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: DEFAULT_REGION.to_string(),
            key: DEFAULT_OUTPUT_FILE.to_string(),
            endpoint: None,
        }
    }
}

/// Root configuration structure for `changelog-hub.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page title.
    pub title: String,
    /// Repositories to aggregate, in display order.
    pub repositories: Vec<RepositoryId>,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub storage: StorageFileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            repositories: vec![],
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            storage: StorageFileConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Loads `path`. A missing file is only tolerated when `required` is
    /// false, in which case defaults are returned.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            info!(
                "configuration file {} not found: using default",
                path.display()
            );
            return Ok(Config::default());
        }

        debug!("loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Static storage credentials.
#[derive(Debug, Clone)]
pub struct StorageCredentials {
    pub access_key_id: SecretString,
    pub secret_access_key: SecretString,
}

/// Resolved storage destination.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<Url>,
    /// `None` defers to the default AWS provider chain.
    pub credentials: Option<StorageCredentials>,
}

/// Fully resolved configuration for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub title: String,
    pub repositories: Vec<RepositoryId>,
    pub remote: RemoteConfig,
    pub output_path: PathBuf,
    /// Key the page is uploaded under.
    pub object_key: String,
    pub storage: Option<StorageConfig>,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_full_config() {
        let config = Config::from_toml(
            r#"
title = "Team Releases"
repositories = ["acme/widgets", "acme/gadgets"]

[source]
branch = "trunk"
timeout_secs = 3

[output]
path = "public/index.html"

[storage]
bucket = "releases"
region = "eu-west-1"
key = "changelog/index.html"
endpoint = "http://localhost:9000"
"#,
        )
        .unwrap();

        assert_eq!(config.title, "Team Releases");
        assert_eq!(
            config
                .repositories
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>(),
            vec!["acme/widgets", "acme/gadgets"]
        );
        assert_eq!(config.source.branch, "trunk");
        assert_eq!(config.source.changelog_path, "CHANGELOG.md");
        assert_eq!(config.source.timeout_secs, 3);
        assert_eq!(config.output.path, PathBuf::from("public/index.html"));
        assert_eq!(config.storage.bucket.as_deref(), Some("releases"));
        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(config.storage.key, "changelog/index.html");
        assert_eq!(
            config.storage.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
    }

    #[test]
    fn uses_defaults_for_missing_fields() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.title, DEFAULT_TITLE);
        assert!(config.repositories.is_empty());
        assert_eq!(config.source.base_url, DEFAULT_RAW_BASE_URL);
        assert_eq!(config.source.branch, "main");
        assert_eq!(config.output.path, PathBuf::from("index.html"));
        assert!(config.storage.bucket.is_none());
        assert_eq!(config.storage.region, "us-east-1");
        assert_eq!(config.storage.key, "index.html");
    }

    #[test]
    fn rejects_invalid_repository_identifiers() {
        let result = Config::from_toml(r#"repositories = ["acme"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_tolerates_missing_default_file_only() {
        let missing = Path::new("definitely/not/here/changelog-hub.toml");

        let config = Config::load(missing, false).unwrap();
        assert!(config.repositories.is_empty());

        assert!(Config::load(missing, true).is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"repositories = ["acme/widgets"]"#).unwrap();

        let config = Config::load(file.path(), true).unwrap();

        assert_eq!(config.repositories.len(), 1);
    }
}
