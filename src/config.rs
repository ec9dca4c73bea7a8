//! Configuration loading and parsing for `release-note.toml` files.
//!
//! Declares the commit groups, how a commit type is read from a message, the
//! commit-line template and optional download links.
use log::*;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::{
    NoteError, Result,
    analyzer::{
        assembler::DEFAULT_COMMIT_TEMPLATE,
        classifier::{
            ClassificationRule, GroupRule, TypeExtractor, default_groups,
        },
    },
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "release-note.toml";

/// How the type token is read from a commit message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitTypeFormat {
    #[default]
    Prefix,
    Conventional,
    Regex,
}

/// A release-note group and the commit types it collects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub types: Vec<String>,
}

/// Download link; both fields are Tera templates rendered with the
/// released tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadConfig {
    pub label: String,
    pub url: String,
}

/// Root configuration structure for `release-note.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository URL (https://github.com/owner/repo.git).
    pub repository: Option<String>,
    /// REST API base URL, derived from the repository host when unset.
    pub api_url: Option<String>,
    /// Commit type extraction strategy.
    pub commit_type: CommitTypeFormat,
    /// Pattern used when `commit_type = "regex"`.
    pub commit_type_pattern: Option<String>,
    /// Tera template for one commit line.
    pub commit_template: String,
    /// Groups in output order. Defaults apply when none are declared.
    #[serde(rename = "group")]
    pub groups: Vec<GroupConfig>,
    /// Links listed under the Downloads section.
    #[serde(rename = "download")]
    pub downloads: Vec<DownloadConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: None,
            api_url: None,
            commit_type: CommitTypeFormat::default(),
            commit_type_pattern: None,
            commit_template: DEFAULT_COMMIT_TEMPLATE.into(),
            groups: vec![],
            downloads: vec![],
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory. Only an explicitly requested file must exist.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (file_path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !file_path.exists() {
            if required {
                return Err(NoteError::configuration(format!(
                    "config file does not exist: {}",
                    file_path.display()
                )));
            }
            info!("no configuration found: using default");
            return Ok(Config::default());
        }

        debug!("loading configuration from {}", file_path.display());
        let content = fs::read_to_string(file_path).await?;
        Self::from_toml(&content)
    }

    /// Build the classification rule declared by this configuration.
    pub fn classification_rule(&self) -> Result<ClassificationRule> {
        let groups = if self.groups.is_empty() {
            default_groups()
        } else {
            let mut groups: Vec<GroupRule> = vec![];

            for g in self.groups.iter() {
                if g.name.trim().is_empty() {
                    return Err(NoteError::configuration(
                        "group name must not be empty",
                    ));
                }

                if groups.iter().any(|existing| existing.name == g.name) {
                    return Err(NoteError::configuration(format!(
                        "duplicate group name: {}",
                        g.name
                    )));
                }

                groups.push(GroupRule {
                    name: g.name.clone(),
                    types: g.types.clone(),
                });
            }

            groups
        };

        let extractor = match self.commit_type {
            CommitTypeFormat::Prefix => TypeExtractor::Prefix,
            CommitTypeFormat::Conventional => TypeExtractor::Conventional,
            CommitTypeFormat::Regex => {
                let pattern =
                    self.commit_type_pattern.as_ref().ok_or_else(|| {
                        NoteError::configuration(
                            "commit_type_pattern is required when commit_type is regex",
                        )
                    })?;
                TypeExtractor::Pattern(Regex::new(pattern)?)
            }
        };

        Ok(ClassificationRule::new(groups, extractor))
    }
}
