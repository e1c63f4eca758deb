//! Configuration for raw changelog retrieval.
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Default host serving raw repository content.
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com/";
/// Default branch the changelog is read from.
pub const DEFAULT_BRANCH: &str = "main";
/// Default changelog path relative to the repository root.
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how changelog files are fetched.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Root of the raw content host. Always ends with `/`.
    pub base_url: Url,
    /// Branch the changelog is read from.
    pub branch: String,
    /// Changelog path relative to the repository root.
    pub changelog_path: String,
    /// Optional bearer token sent with every request.
    pub token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Normalizes `base_url` so relative joins keep its path.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_RAW_BASE_URL)
                .expect("default raw base url is valid"),
            branch: DEFAULT_BRANCH.to_string(),
            changelog_path: DEFAULT_CHANGELOG_PATH.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_remote_config() {
        let remote = RemoteConfig::default();
        assert_eq!(remote.base_url.as_str(), DEFAULT_RAW_BASE_URL);
        assert_eq!(remote.branch, "main");
        assert!(remote.token.is_none());
    }

    #[test]
    fn with_base_url_appends_trailing_slash() {
        let remote = RemoteConfig::default()
            .with_base_url(Url::parse("http://localhost:8080/raw").unwrap());
        assert_eq!(remote.base_url.as_str(), "http://localhost:8080/raw/");
    }
}
