use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// A named pointer to a commit, as listed by the forge (newest first).
pub struct Tag {
    pub name: String,
    pub sha: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Represents a normalized commit returned from the forge
pub struct RawCommit {
    pub sha: String,
    pub message: String,
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Commit a ref resolves to, carrying the author date used for date-bounded
/// commit listing.
pub struct CommitDetail {
    pub sha: String,
    pub date: DateTime<Utc>,
}
