//! Persists a rendered document locally and uploads it to object storage.
use log::*;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{error::PublishError, render::Document};

pub mod store;

use store::ObjectStore;

/// Content type attached to the uploaded page.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Writes the page to `output_path` and, when a store is configured, uploads
/// it under `object_key`.
pub struct Publisher {
    output_path: PathBuf,
    object_key: String,
    store: Option<Box<dyn ObjectStore>>,
}

impl Publisher {
    pub fn new(
        output_path: impl Into<PathBuf>,
        object_key: impl Into<String>,
        store: Option<Box<dyn ObjectStore>>,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            object_key: object_key.into(),
            store,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Storage location of the uploaded page, `None` when uploads are
    /// disabled.
    pub fn location(&self) -> Option<String> {
        self.store
            .as_ref()
            .map(|store| store.location(&self.object_key))
    }

    /// Writes the local copy first so it exists even when the upload fails.
    pub async fn publish(&self, document: &Document) -> Result<(), PublishError> {
        self.write_local(document).await?;

        let Some(store) = self.store.as_ref() else {
            info!("no storage configured: skipping upload");
            return Ok(());
        };

        let location = store.location(&self.object_key);

        info!("uploading {} to {location}", self.output_path.display());

        store
            .put_object(
                &self.object_key,
                document.html.clone().into_bytes(),
                HTML_CONTENT_TYPE,
            )
            .await
            .map_err(|err| PublishError::Upload {
                location,
                message: err.to_string(),
            })
    }

    async fn write_local(&self, document: &Document) -> Result<(), PublishError> {
        let local_write_error = |source| PublishError::LocalWrite {
            path: self.output_path.clone(),
            source,
        };

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(local_write_error)?;
        }

        info!("writing report to {}", self.output_path.display());

        fs::write(&self.output_path, &document.html)
            .await
            .map_err(local_write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HubError;
    use store::MockObjectStore;
    use tempfile::TempDir;

    fn document() -> Document {
        Document {
            html: "<html>hub</html>".into(),
            generated_at: "2024-03-01 00:00:00 UTC".into(),
            entry_count: 0,
        }
    }

    fn store_with_location() -> MockObjectStore {
        let mut store = MockObjectStore::new();
        store
            .expect_location()
            .returning(|key| format!("s3://bucket/{key}"));
        store
    }

    #[tokio::test]
    async fn writes_local_file_and_uploads_html() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("site").join("index.html");

        let mut store = store_with_location();
        store
            .expect_put_object()
            .withf(|key, body, content_type| {
                key == "index.html"
                    && body.as_slice() == b"<html>hub</html>"
                    && content_type == "text/html; charset=utf-8"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let publisher =
            Publisher::new(&output, "index.html", Some(Box::new(store)));

        publisher.publish(&document()).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<html>hub</html>"
        );
        assert_eq!(
            publisher.location().as_deref(),
            Some("s3://bucket/index.html")
        );
    }

    #[test_log::test(tokio::test)]
    async fn reports_upload_failure_and_keeps_local_copy() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("index.html");

        let mut store = store_with_location();
        store
            .expect_put_object()
            .returning(|_, _, _| Err(HubError::storage("AccessDenied")));

        let publisher =
            Publisher::new(&output, "index.html", Some(Box::new(store)));

        let err = publisher.publish(&document()).await.unwrap_err();

        match err {
            PublishError::Upload { location, message } => {
                assert_eq!(location, "s3://bucket/index.html");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(output.exists());
    }

    #[tokio::test]
    async fn skips_upload_without_store() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("index.html");

        let publisher = Publisher::new(&output, "index.html", None);

        publisher.publish(&document()).await.unwrap();

        assert!(output.exists());
        assert!(publisher.location().is_none());
    }

    #[tokio::test]
    async fn local_write_failure_is_distinct_and_skips_upload() {
        let tmp = TempDir::new().unwrap();
        // a regular file cannot act as a parent directory
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let output = blocker.join("index.html");

        let mut store = store_with_location();
        store.expect_put_object().never();

        let publisher =
            Publisher::new(&output, "index.html", Some(Box::new(store)));

        let err = publisher.publish(&document()).await.unwrap_err();

        assert!(matches!(err, PublishError::LocalWrite { ref path, .. } if path == &output));
    }
}
