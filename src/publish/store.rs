//! Durable object storage for the rendered page.
use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
};
use log::*;
use secrecy::ExposeSecret;

#[cfg(test)]
use mockall::automock;

use crate::{HubError, Result, config::StorageConfig};

/// Destination able to persist a single object under a key.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Human readable location of `key`, e.g. `s3://bucket/index.html`.
    fn location(&self, key: &str) -> String;

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

/// Amazon S3 (or S3-compatible) bucket.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Static credentials are used when configured, the default AWS provider
    /// chain otherwise. A custom endpoint switches to path-style addressing.
    pub async fn new(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(credentials) = config.credentials.as_ref() {
            debug!("using static storage credentials");
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.expose_secret(),
                credentials.secret_access_key.expose_secret(),
                None,
                None,
                env!("CARGO_PKG_NAME"),
            ));
        }

        if let Some(endpoint) = config.endpoint.as_ref() {
            debug!("using custom storage endpoint: {endpoint}");
            loader = loader.endpoint_url(endpoint.as_str());
        }

        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| {
                HubError::storage(DisplayErrorContext(&err).to_string())
            })?;

        Ok(())
    }
}
