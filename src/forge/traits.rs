//! Traits related to remote changelog sources
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::forge::types::{FetchOutcome, RepositoryId};

/// Retrieves the raw changelog text of a repository.
///
/// Implementations must not fail: every problem is folded into
/// [`FetchOutcome::NotFound`] or [`FetchOutcome::Failed`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChangelogSource: Send + Sync {
    async fn fetch(&self, repository: &RepositoryId) -> FetchOutcome;
}
