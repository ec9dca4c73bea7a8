//! Traits related to remote git forges
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::request::{CommitDetail, RawCommit, Tag},
};

/// Lists the tags of a repository.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TagSource: Send + Sync {
    /// All tags, newest first.
    async fn list_tags(&self) -> Result<Vec<Tag>>;
}

/// Reads commit history from a repository.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Resolve a ref (tag name or sha) to its commit.
    async fn get_commit(&self, reference: &str) -> Result<CommitDetail>;
    /// Every commit in the history of `sha` authored at or before `date`.
    async fn list_commits_until(
        &self,
        sha: &str,
        date: DateTime<Utc>,
    ) -> Result<Vec<RawCommit>>;
    /// Commits reachable from `compare` but not from `base`.
    async fn list_commits_between(
        &self,
        base: &str,
        compare: &str,
    ) -> Result<Vec<RawCommit>>;
}

/// Publishes a release for an existing tag.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleasePublisher: Send + Sync {
    async fn publish(&self, tag: &str, title: &str, body: &str) -> Result<()>;
}
