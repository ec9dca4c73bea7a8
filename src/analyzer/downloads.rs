//! Download links rendered for the released tag.
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    Result,
    analyzer::assembler::{DOWNLOADS_HEADING, ExtraSection, Link},
    config::DownloadConfig,
};

/// Values available to download label and url templates.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadContext {
    pub tag: String,
    pub version: String,
    pub owner: String,
    pub repo: String,
}

impl DownloadContext {
    pub fn new(tag: &str, owner: &str, repo: &str) -> Self {
        Self {
            tag: tag.to_string(),
            version: tag.strip_prefix('v').unwrap_or(tag).to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// Render the Downloads section, or `None` when no links are configured.
pub fn render_downloads(
    downloads: &[DownloadConfig],
    ctx: &DownloadContext,
) -> Result<Option<ExtraSection>> {
    if downloads.is_empty() {
        return Ok(None);
    }

    let context = Context::from_serialize(ctx)?;

    let entries = downloads
        .iter()
        .map(|d| {
            Ok(Link {
                label: Tera::one_off(&d.label, &context, false)?,
                url: Tera::one_off(&d.url, &context, false)?,
            })
        })
        .collect::<Result<Vec<Link>>>()?;

    Ok(Some(ExtraSection {
        heading: DOWNLOADS_HEADING.to_string(),
        entries,
    }))
}
