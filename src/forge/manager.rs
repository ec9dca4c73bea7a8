//! Manager that wraps forge implementations
use chrono::{DateTime, Utc};
use log::*;

use crate::{
    Result,
    forge::{
        request::{CommitDetail, RawCommit, Tag},
        traits::{CommitSource, ReleasePublisher, TagSource},
    },
};

pub struct ForgeManager {
    tags: Box<dyn TagSource>,
    commits: Box<dyn CommitSource>,
    publisher: Box<dyn ReleasePublisher>,
}

impl ForgeManager {
    pub fn new(
        tags: Box<dyn TagSource>,
        commits: Box<dyn CommitSource>,
        publisher: Box<dyn ReleasePublisher>,
    ) -> Self {
        Self {
            tags,
            commits,
            publisher,
        }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = self.tags.list_tags().await?;
        debug!("found {} tags", tags.len());
        Ok(tags)
    }

    pub async fn get_commit(&self, reference: &str) -> Result<CommitDetail> {
        debug!("resolving commit for ref: {reference}");
        self.commits.get_commit(reference).await
    }

    pub async fn list_commits_until(
        &self,
        sha: &str,
        date: DateTime<Utc>,
    ) -> Result<Vec<RawCommit>> {
        debug!("listing commits of {sha} until: {date}");
        let commits = self.commits.list_commits_until(sha, date).await?;
        debug!("found {} commits", commits.len());
        Ok(commits)
    }

    pub async fn list_commits_between(
        &self,
        base: &str,
        compare: &str,
    ) -> Result<Vec<RawCommit>> {
        debug!("listing commits between {base} and {compare}");
        let commits = self.commits.list_commits_between(base, compare).await?;
        debug!("found {} commits", commits.len());
        Ok(commits)
    }

    pub async fn publish(
        &self,
        tag: &str,
        title: &str,
        body: &str,
    ) -> Result<()> {
        self.publisher.publish(tag, title, body).await?;
        info!("posted release notes for {tag}");
        Ok(())
    }
}
