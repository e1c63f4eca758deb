//! CLI argument parsing and run configuration resolution.
use clap::{Parser, Subcommand};
use log::*;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::{
    HubError, Result,
    config::{
        Config, DEFAULT_CONFIG_FILE, HubConfig, StorageConfig,
        StorageCredentials,
    },
    forge::{config::RemoteConfig, types::RepositoryId},
};

/// Global CLI arguments. Every flag overrides the configuration file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Configuration file. Defaults to ./changelog-hub.toml when present.
    pub config: Option<PathBuf>,

    #[arg(long = "repo", value_name = "OWNER/NAME", global = true)]
    /// Repository to aggregate. Repeatable; replaces the configured list.
    pub repos: Vec<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    /// Access token sent as a bearer token when fetching changelogs.
    pub github_token: Option<String>,

    #[arg(long, env = "S3_BUCKET", global = true)]
    /// Bucket the rendered page is uploaded to.
    pub bucket: Option<String>,

    #[arg(long, env = "AWS_REGION", global = true)]
    /// Storage region.
    pub region: Option<String>,

    #[arg(
        long,
        env = "AWS_ACCESS_KEY_ID",
        hide_env_values = true,
        global = true
    )]
    /// Static storage access key id.
    pub aws_access_key_id: Option<String>,

    #[arg(
        long,
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true,
        global = true
    )]
    /// Static storage secret access key.
    pub aws_secret_access_key: Option<String>,

    #[arg(long, global = true)]
    /// Local path the rendered page is written to.
    pub output: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Page title.
    pub title: Option<String>,

    #[arg(long, global = true)]
    /// Branch changelogs are read from.
    pub branch: Option<String>,

    #[arg(long, default_value_t = false, global = true)]
    /// Write the page locally but skip the upload.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch every changelog, render the page, write it and upload it.
    Publish,

    /// Print the parsed changelog entries of every repository as JSON.
    Show {
        /// Write the JSON to this file instead of stdout.
        #[arg(long)]
        out_file: Option<String>,
    },
}

/// Empty values (e.g. `GITHUB_TOKEN=`) count as unset.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

impl Args {
    /// Loads the configuration file, applies CLI overrides and resolves the
    /// result into the single [`HubConfig`] used by the run.
    pub fn resolve_config(&self) -> Result<HubConfig> {
        let (path, required) = match self.config.as_ref() {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let file = Config::load(&path, required)?;

        let repositories = if self.repos.is_empty() {
            file.repositories
        } else {
            self.repos
                .iter()
                .map(|raw| raw.parse::<RepositoryId>())
                .collect::<Result<Vec<_>>>()?
        };

        let remote = RemoteConfig {
            branch: non_empty(&self.branch).unwrap_or(file.source.branch),
            changelog_path: file.source.changelog_path,
            token: non_empty(&self.github_token).map(SecretString::from),
            timeout: Duration::from_secs(file.source.timeout_secs),
            ..RemoteConfig::default()
        }
        .with_base_url(Url::parse(&file.source.base_url)?);

        let bucket =
            non_empty(&self.bucket).or_else(|| non_empty(&file.storage.bucket));

        let storage = match bucket {
            Some(bucket) if !self.dry_run => Some(StorageConfig {
                bucket,
                region: non_empty(&self.region)
                    .unwrap_or(file.storage.region),
                endpoint: file
                    .storage
                    .endpoint
                    .as_deref()
                    .map(Url::parse)
                    .transpose()?,
                credentials: self.storage_credentials()?,
            }),
            Some(bucket) => {
                debug!("dry run: ignoring configured bucket {bucket}");
                None
            }
            None => None,
        };

        Ok(HubConfig {
            title: non_empty(&self.title).unwrap_or(file.title),
            repositories,
            remote,
            output_path: self.output.clone().unwrap_or(file.output.path),
            object_key: file.storage.key,
            storage,
            dry_run: self.dry_run,
        })
    }

    fn storage_credentials(&self) -> Result<Option<StorageCredentials>> {
        match (
            non_empty(&self.aws_access_key_id),
            non_empty(&self.aws_secret_access_key),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => {
                Ok(Some(StorageCredentials {
                    access_key_id: SecretString::from(access_key_id),
                    secret_access_key: SecretString::from(secret_access_key),
                }))
            }
            (None, None) => Ok(None),
            _ => Err(HubError::invalid_config(
                "access key id and secret access key must be set together",
            )),
        }
    }
}
