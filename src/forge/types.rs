use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::error::HubError;

/// Identifies a hosted repository as an `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> crate::Result<Self> {
        let owner = owner.into();
        let name = name.into();

        let valid = |segment: &str| {
            !segment.is_empty()
                && !segment.contains('/')
                && !segment.chars().any(char::is_whitespace)
        };

        if !valid(&owner) || !valid(&name) {
            return Err(HubError::invalid_repository(format!(
                "{owner}/{name}"
            )));
        }

        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepositoryId {
    type Err = HubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| HubError::invalid_repository(raw))?;
        Self::new(owner, name).map_err(|_| HubError::invalid_repository(raw))
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = HubError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for RepositoryId {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Result of retrieving a repository's changelog.
///
/// Absence and failure are kept apart so callers can tell them apart, even
/// though both contribute no entries to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw changelog text
    Content(String),
    /// The changelog file does not exist (HTTP 404)
    NotFound,
    /// Any other non-success status or a transport level failure
    Failed(String),
}

impl FetchOutcome {
    /// Content when present, `None` for both absence and failure.
    pub fn content(&self) -> Option<&str> {
        match self {
            FetchOutcome::Content(content) => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_name_pairs() {
        let repo: RepositoryId = "acme/widgets".parse().unwrap();
        assert_eq!(repo.owner(), "acme");
        assert_eq!(repo.name(), "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");

        let repo: RepositoryId = "  acme/widgets.rs \n".parse().unwrap();
        assert_eq!(repo.to_string(), "acme/widgets.rs");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for raw in ["", "acme", "/widgets", "acme/", "a/b/c", "ac me/widgets"]
        {
            let result = raw.parse::<RepositoryId>();
            assert!(
                matches!(result, Err(HubError::InvalidRepository(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn deserializes_from_string() {
        let repos: Vec<RepositoryId> =
            serde_json::from_str(r#"["acme/widgets", "acme/gadgets"]"#)
                .unwrap();
        assert_eq!(repos[1].name(), "gadgets");

        let result: Result<Vec<RepositoryId>, _> =
            serde_json::from_str(r#"["nope"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn fetch_outcome_exposes_content_only_on_success() {
        assert_eq!(
            FetchOutcome::Content("## [1.0.0]".into()).content(),
            Some("## [1.0.0]")
        );
        assert_eq!(FetchOutcome::NotFound.content(), None);
        assert_eq!(FetchOutcome::Failed("timeout".into()).content(), None);
    }
}
