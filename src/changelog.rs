//! Structured release entries extracted from repository changelogs.
//!
//! The [`parser`] turns raw changelog markdown into at most
//! [`MAX_ENTRIES`] entries, in document order, without ever failing: text
//! it cannot make sense of simply yields no entries.
use serde::{Serialize, Serializer};
use std::fmt;

use crate::forge::types::RepositoryId;

pub mod parser;

pub use parser::parse;

/// Maximum number of entries kept per repository.
pub const MAX_ENTRIES: usize = 3;
/// Maximum number of characters kept in an entry summary.
pub const MAX_SUMMARY_CHARS: usize = 200;
/// Appended to a summary that was cut at [`MAX_SUMMARY_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";
/// Displayed in place of a release date that could not be found.
pub const UNKNOWN_DATE: &str = "N/A";

/// Release date as found on the first line of a release section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseDate {
    /// Date text exactly as it appeared in the changelog.
    Known(String),
    /// No recognizable date was present.
    Unknown,
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDate::Known(date) => f.write_str(date),
            ReleaseDate::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

impl Serialize for ReleaseDate {
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

/// A single release extracted from a changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    /// Version token from the section header, trimmed. Never empty.
    pub version: String,
    /// Release date or [`ReleaseDate::Unknown`]
    pub date: ReleaseDate,
    /// Bullet-stripped change text, capped at [`MAX_SUMMARY_CHARS`] plus
    /// [`TRUNCATION_MARKER`]
    pub summary: String,
}

/// Entries extracted for one configured repository during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReport {
    pub repository: RepositoryId,
    pub entries: Vec<ChangelogEntry>,
}

impl RepositoryReport {
    pub fn new(repository: RepositoryId, entries: Vec<ChangelogEntry>) -> Self {
        Self {
            repository,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_displays_sentinel_when_unknown() {
        assert_eq!(ReleaseDate::Unknown.to_string(), "N/A");
        assert_eq!(
            ReleaseDate::Known("2024-03-01".into()).to_string(),
            "2024-03-01"
        );
    }

    #[test]
    fn report_serializes_flat_strings() {
        let report = RepositoryReport::new(
            "acme/widgets".parse().unwrap(),
            vec![ChangelogEntry {
                version: "1.0.0".into(),
                date: ReleaseDate::Unknown,
                summary: "Initial".into(),
            }],
        );

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "repository": "acme/widgets",
                "entries": [
                    {"version": "1.0.0", "date": "N/A", "summary": "Initial"}
                ]
            })
        );
    }
}
