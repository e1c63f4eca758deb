//! Custom error types for changelog-hub.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for changelog-hub operations.
#[derive(Error, Debug)]
pub enum HubError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid repository identifier '{0}': expected owner/name")]
    InvalidRepository(String),

    // Network/storage errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Storage operation failed: {0}")]
    StorageError(String),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using HubError
pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid repository error
    pub fn invalid_repository(raw: impl Into<String>) -> Self {
        Self::InvalidRepository(raw.into())
    }

    /// Create a storage error with context
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }
}

/// Failures of the publish step. Only `LocalWrite` is meant to abort a run.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to write {}: {source}", path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upload to {location}: {message}")]
    Upload { location: String, message: String },
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError(err.to_string())
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for HubError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidConfig(format!("Invalid header value: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = HubError::invalid_config("missing bucket");
        assert_eq!(err.to_string(), "Invalid configuration: missing bucket");

        let err = HubError::invalid_repository("not-a-repo");
        assert_eq!(
            err.to_string(),
            "Invalid repository identifier 'not-a-repo': expected owner/name"
        );

        let err = HubError::storage("access denied");
        assert_eq!(err.to_string(), "Storage operation failed: access denied");
    }

    #[test]
    fn test_publish_error_display() {
        let err = PublishError::Upload {
            location: "s3://bucket/index.html".into(),
            message: "AccessDenied".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to upload to s3://bucket/index.html: AccessDenied"
        );

        let err = PublishError::LocalWrite {
            path: PathBuf::from("out/index.html"),
            source: std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ),
        };
        assert_eq!(err.to_string(), "failed to write out/index.html: read-only");
    }

    #[test]
    fn test_from_conversions() {
        let toml_err = toml::from_str::<toml::Table>("not = [valid");
        assert!(toml_err.is_err());
        let err: HubError = toml_err.unwrap_err().into();
        assert!(matches!(err, HubError::TomlParseError(_)));

        let publish_err = PublishError::Upload {
            location: "s3://b/k".into(),
            message: "boom".into(),
        };
        let err: HubError = publish_err.into();
        assert!(matches!(err, HubError::Publish(PublishError::Upload { .. })));
    }
}
