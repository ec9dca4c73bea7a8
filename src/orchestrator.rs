//! Release-note pipeline: tags, range, commits, classification, assembly and
//! publication, run strictly in sequence.
use derive_builder::Builder;
use log::*;
use std::rc::Rc;

use crate::{
    NoteError, Result,
    analyzer::{
        assembler::{DEFAULT_COMMIT_TEMPLATE, ExtraSection, NoteAssembler},
        classifier::{ClassificationRule, classify_all},
        downloads::{DownloadContext, render_downloads},
        range::{TagRange, select_range},
        window::{FetchPlan, resolve_window},
    },
    config::DownloadConfig,
    forge::{manager::ForgeManager, request::RawCommit},
};

const RULE: &str =
    "================================================================";

/// Immutable settings for a single pipeline run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorConfig {
    #[builder(default)]
    pub rule: ClassificationRule,
    #[builder(default = "DEFAULT_COMMIT_TEMPLATE.to_string()")]
    pub commit_template: String,
    #[builder(default)]
    pub downloads: Vec<DownloadConfig>,
    pub owner: String,
    pub repo: String,
    #[builder(default)]
    pub dry_run: bool,
}

impl OrchestratorConfigBuilder {
    pub fn build(&self) -> Result<OrchestratorConfig> {
        self._build().map_err(|e| {
            NoteError::configuration(format!(
                "Failed to build orchestrator config: {}",
                e
            ))
        })
    }
}

impl OrchestratorConfig {
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNote {
    pub tag: String,
    pub body: String,
    pub published: bool,
}

pub struct Orchestrator {
    config: Rc<OrchestratorConfig>,
    forge: Rc<ForgeManager>,
    assembler: NoteAssembler,
}

impl Orchestrator {
    pub fn new(
        config: Rc<OrchestratorConfig>,
        forge: Rc<ForgeManager>,
    ) -> Result<Self> {
        let assembler = NoteAssembler::new(&config.commit_template)?;
        Ok(Self {
            config,
            forge,
            assembler,
        })
    }

    /// Generate the note for `requested_tag` (newest tag when `None`), print
    /// it, and publish it unless running dry.
    pub async fn run(
        &self,
        requested_tag: Option<&str>,
    ) -> Result<ReleaseNote> {
        let mut note = self.generate(requested_tag).await?;

        println!("\n{RULE}");
        println!("{}", note.body);
        println!("{RULE}\n");

        if self.config.dry_run {
            info!("dry run: skipping release publication for {}", note.tag);
            return Ok(note);
        }

        self.forge.publish(&note.tag, &note.tag, &note.body).await?;
        note.published = true;

        Ok(note)
    }

    /// Build the note without publishing it.
    pub async fn generate(
        &self,
        requested_tag: Option<&str>,
    ) -> Result<ReleaseNote> {
        let tags = self.forge.list_tags().await?;
        let range = select_range(&tags, requested_tag)?;
        info!("tag: {}", range.compare.name);

        let commits = self.fetch_commits(&range).await?;
        let classified = classify_all(&commits, &self.config.rule);

        let mut extra_sections: Vec<ExtraSection> = vec![];
        let ctx = DownloadContext::new(
            &range.compare.name,
            &self.config.owner,
            &self.config.repo,
        );
        if let Some(downloads) =
            render_downloads(&self.config.downloads, &ctx)?
        {
            extra_sections.push(downloads);
        }

        let body = self.assembler.assemble(
            &classified,
            &self.config.rule.group_order(),
            &extra_sections,
        )?;

        Ok(ReleaseNote {
            tag: range.compare.name,
            body,
            published: false,
        })
    }

    async fn fetch_commits(&self, range: &TagRange) -> Result<Vec<RawCommit>> {
        match resolve_window(range) {
            FetchPlan::Between { base, compare } => {
                self.forge.list_commits_between(&base, &compare).await
            }
            FetchPlan::UntilTag { tag } => {
                info!("no previous tag: collecting all commits up to {tag}");
                let commit =
                    self.forge.get_commit(&tag).await.inspect_err(|_| {
                        error!(
                            "Could not get commit of {tag}. Please check tag is registered on the repository."
                        )
                    })?;
                self.forge
                    .list_commits_until(&commit.sha, commit.date)
                    .await
            }
        }
    }
}
