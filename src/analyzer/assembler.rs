//! Rendering of classified commits into the grouped release-note document.
use log::*;
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    Result,
    analyzer::classifier::{ClassifiedCommit, title},
};

/// Default Tera template for a single commit line.
pub const DEFAULT_COMMIT_TEMPLATE: &str =
    "* {{ short_sha }} {{ title | capitalize }}";
/// Heading of the download links section.
pub const DOWNLOADS_HEADING: &str = "Downloads";

const COMMIT_TEMPLATE_NAME: &str = "commit";
const SHORT_SHA_LEN: usize = 7;

/// Labelled link rendered as `* [label](url)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Section of links appended after the commit groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraSection {
    pub heading: String,
    pub entries: Vec<Link>,
}

#[derive(Serialize)]
struct CommitContext<'a> {
    group: &'a str,
    sha: &'a str,
    short_sha: String,
    message: &'a str,
    title: &'a str,
    author: &'a str,
}

impl<'a> From<&'a ClassifiedCommit> for CommitContext<'a> {
    fn from(commit: &'a ClassifiedCommit) -> Self {
        Self {
            group: &commit.group,
            sha: &commit.sha,
            short_sha: short_sha(&commit.sha),
            message: &commit.message,
            title: title(&commit.message),
            author: &commit.author,
        }
    }
}

/// First seven characters of a commit sha.
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// Renders release notes using a compiled commit-line template.
pub struct NoteAssembler {
    tera: Tera,
}

impl NoteAssembler {
    /// Compile the commit-line template once for every commit rendered.
    pub fn new(commit_template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(COMMIT_TEMPLATE_NAME, commit_template)?;
        Ok(Self { tera })
    }

    /// Render one section per non-empty group in `group_order`, followed by
    /// the extra link sections.
    pub fn assemble(
        &self,
        classified: &[ClassifiedCommit],
        group_order: &[String],
        extra_sections: &[ExtraSection],
    ) -> Result<String> {
        let unknown: Vec<&str> = classified
            .iter()
            .filter(|c| !group_order.contains(&c.group))
            .map(|c| c.group.as_str())
            .collect();

        debug_assert!(
            unknown.is_empty(),
            "classified commits reference undeclared groups: {unknown:?}"
        );

        if !unknown.is_empty() {
            error!("skipping commits in undeclared groups: {unknown:?}");
        }

        let mut note = String::new();

        for group in group_order {
            let commits: Vec<&ClassifiedCommit> =
                classified.iter().filter(|c| &c.group == group).collect();

            if commits.is_empty() {
                continue;
            }

            note.push_str(&section(group, &self.render_commits(&commits)?));
        }

        for extra in extra_sections {
            if extra.entries.is_empty() {
                continue;
            }

            note.push_str(&section(
                &extra.heading,
                &render_links(&extra.entries),
            ));
        }

        Ok(note)
    }

    fn render_commits(&self, commits: &[&ClassifiedCommit]) -> Result<String> {
        let mut rendered = String::new();

        for commit in commits {
            let context =
                Context::from_serialize(CommitContext::from(*commit))?;
            rendered
                .push_str(&self.tera.render(COMMIT_TEMPLATE_NAME, &context)?);
            rendered.push('\n');
        }

        Ok(rendered)
    }
}

/// Assemble a note with the default commit-line template.
pub fn assemble(
    classified: &[ClassifiedCommit],
    group_order: &[String],
    extra_sections: &[ExtraSection],
) -> Result<String> {
    NoteAssembler::new(DEFAULT_COMMIT_TEMPLATE)?.assemble(
        classified,
        group_order,
        extra_sections,
    )
}

fn section(heading: &str, body: &str) -> String {
    format!("\n## {heading}\n\n{body}")
}

fn render_links(links: &[Link]) -> String {
    links
        .iter()
        .map(|link| format!("* [{}]({})\n", link.label, link.url))
        .collect()
}
