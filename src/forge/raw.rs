//! Implements the ChangelogSource trait over a raw content host
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, StatusCode, Url,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;

use crate::{
    HubError, Result,
    forge::{
        config::RemoteConfig,
        traits::ChangelogSource,
        types::{FetchOutcome, RepositoryId},
    },
};

/// Fetches `<base>/<owner>/<name>/<branch>/<changelog path>` with reqwest.
pub struct RawContentSource {
    config: RemoteConfig,
    client: Client,
}

impl RawContentSource {
    /// Create client with optional bearer authentication and the configured
    /// request timeout.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = config.token.as_ref() {
            let mut token_value = HeaderValue::from_str(
                format!("Bearer {}", token.expose_secret()).as_str(),
            )?;
            token_value.set_sensitive(true);
            headers.append(AUTHORIZATION, token_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    /// Branch and changelog path are split on `/` and every segment is
    /// percent-encoded, so `#` or `?` never end up as fragment or query.
    pub fn changelog_url(&self, repository: &RepositoryId) -> Result<Url> {
        let mut url = self.config.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                HubError::invalid_config(format!(
                    "base url cannot hold a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .push(repository.owner())
            .push(repository.name())
            .extend(
                self.config
                    .branch
                    .split('/')
                    .chain(self.config.changelog_path.split('/'))
                    .filter(|segment| !segment.is_empty()),
            );

        Ok(url)
    }

    async fn get(&self, url: Url) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => return FetchOutcome::Failed(err.to_string()),
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }

        if !status.is_success() {
            return FetchOutcome::Failed(format!("unexpected status {status}"));
        }

        match response.text().await {
            Ok(content) => FetchOutcome::Content(content),
            Err(err) => FetchOutcome::Failed(err.to_string()),
        }
    }
}

#[async_trait]
impl ChangelogSource for RawContentSource {
    async fn fetch(&self, repository: &RepositoryId) -> FetchOutcome {
        let url = match self.changelog_url(repository) {
            Ok(url) => url,
            Err(err) => return FetchOutcome::Failed(err.to_string()),
        };

        debug!("fetching changelog for {repository}: {url}");

        let outcome = self.get(url).await;

        match &outcome {
            FetchOutcome::Content(content) => {
                debug!("fetched {} bytes for {repository}", content.len())
            }
            FetchOutcome::NotFound => {
                debug!("no changelog found for {repository}")
            }
            FetchOutcome::Failed(reason) => {
                warn!("failed to fetch changelog for {repository}: {reason}")
            }
        }

        outcome
    }
}
