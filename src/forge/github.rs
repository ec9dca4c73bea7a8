//! Implements the forge traits for Github
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::*;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::{
    NoteError, Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{CommitDetail, RawCommit, Tag},
        traits::{CommitSource, ReleasePublisher, TagSource},
    },
};

#[derive(Debug, Deserialize)]
struct TagCommit {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct GithubTag {
    pub name: String,
    pub commit: TagCommit,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct CommitData {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GithubCommit {
    pub sha: String,
    pub commit: CommitData,
}

#[derive(Debug, Deserialize)]
struct CompareResult {
    pub commits: Vec<GithubCommit>,
}

#[derive(Debug, Clone, Serialize)]
struct PageParams {
    pub per_page: u8,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            sha: None,
            until: None,
        }
    }
}

/// Request pages from 1 upward until one comes back short of
/// [`DEFAULT_PAGE_SIZE`].
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = vec![];
    let mut page = 1;

    loop {
        let batch = fetch(page).await?;
        let count = batch.len();
        items.extend(batch);

        if count < DEFAULT_PAGE_SIZE as usize {
            break;
        }

        page += 1;
    }

    Ok(items)
}

impl From<GithubCommit> for RawCommit {
    fn from(commit: GithubCommit) -> Self {
        Self {
            sha: commit.sha,
            message: commit.commit.message,
            author_name: commit
                .commit
                .author
                .map(|a| a.name)
                .unwrap_or_default(),
        }
    }
}

/// Map an octocrab failure to a remote error carrying the request and the
/// response status.
fn remote_error(
    method: &str,
    route: &str,
    err: octocrab::Error,
) -> NoteError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            error!("{method} {route}: {}", source.message);
            NoteError::remote(method, route, source.status_code.as_u16())
        }
        err => NoteError::Other(color_eyre::eyre::eyre!(
            "{method} {route} failed: {err}"
        )),
    }
}

/// GitHub forge implementation using Octocrab for the REST API calls that
/// list tags and commits and create releases.
#[derive(Clone)]
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())
            .and_then(|b| b.build())
            .map_err(|err| {
                NoteError::configuration(format!(
                    "failed to create github client for {}: {err}",
                    config.api_url
                ))
            })?;

        Ok(Self { config, instance })
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{path}", self.config.owner, self.config.repo)
    }

    async fn get_page<T>(
        &self,
        route: &str,
        params: &PageParams,
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {route} page {}", params.page);
        self.instance
            .get(route, Some(params))
            .await
            .map_err(|err| remote_error("GET", route, err))
    }

    /// Collect every page of a list endpoint, applying the filters in
    /// `filter` to each request.
    async fn get_all<T>(
        &self,
        route: &str,
        filter: PageParams,
    ) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        collect_pages(|page| {
            let params = PageParams {
                page,
                ..filter.clone()
            };
            async move { self.get_page::<Vec<T>>(route, &params).await }
        })
        .await
    }
}

#[async_trait]
impl TagSource for Github {
    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let route = self.route("tags");
        let tags: Vec<GithubTag> =
            self.get_all(&route, PageParams::default()).await?;

        Ok(tags
            .into_iter()
            .map(|t| Tag {
                name: t.name,
                sha: t.commit.sha,
            })
            .collect())
    }
}

#[async_trait]
impl CommitSource for Github {
    async fn get_commit(&self, reference: &str) -> Result<CommitDetail> {
        let route = self.route(&format!("commits/{reference}"));
        debug!("GET {route}");

        let commit: GithubCommit = self
            .instance
            .get(&route, None::<&()>)
            .await
            .map_err(|err| remote_error("GET", &route, err))?;

        let author = commit.commit.author.ok_or_else(|| {
            NoteError::not_found(format!(
                "Could not get commit of {reference}: commit has no author date"
            ))
        })?;

        let date =
            DateTime::parse_from_rfc3339(&author.date)?.with_timezone(&Utc);

        Ok(CommitDetail {
            sha: commit.sha,
            date,
        })
    }

    async fn list_commits_until(
        &self,
        sha: &str,
        date: DateTime<Utc>,
    ) -> Result<Vec<RawCommit>> {
        let route = self.route("commits");
        let filter = PageParams {
            sha: Some(sha.to_string()),
            until: Some(date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ..PageParams::default()
        };
        let commits: Vec<GithubCommit> = self.get_all(&route, filter).await?;

        Ok(commits.into_iter().map(RawCommit::from).collect())
    }

    async fn list_commits_between(
        &self,
        base: &str,
        compare: &str,
    ) -> Result<Vec<RawCommit>> {
        let route = self.route(&format!("compare/{base}...{compare}"));

        let commits = collect_pages(|page| {
            let params = PageParams {
                page,
                ..PageParams::default()
            };
            let route = route.as_str();
            async move {
                let result: CompareResult =
                    self.get_page(route, &params).await?;
                Ok(result.commits)
            }
        })
        .await?;

        Ok(commits.into_iter().map(RawCommit::from).collect())
    }
}

#[async_trait]
impl ReleasePublisher for Github {
    async fn publish(&self, tag: &str, title: &str, body: &str) -> Result<()> {
        let route = self.route("releases");
        debug!("POST {route} for tag {tag}");

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(tag)
            .name(title)
            .body(body)
            .draft(false)
            .prerelease(false)
            .send()
            .await
            .map_err(|err| remote_error("POST", &route, err))?;

        Ok(())
    }
}
