//! CLI argument parsing and remote repository configuration.
use clap::Parser;
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};
use url::Url;

use crate::{
    NoteError, Result,
    config::Config,
    forge::config::{RemoteConfig, default_api_url},
};

/// Environment variable consulted when no token is passed or embedded in
/// the repository URL.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Generate a release note from the commits of a tag and publish it.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long)]
    /// Tag to release. Defaults to the newest tag.
    pub tag: Option<String>,

    #[arg(long)]
    /// Repository URL (https://github.com/owner/repo). Falls back to
    /// `repository` in the config file.
    pub repo: Option<String>,

    #[arg(long, default_value = "")]
    /// Personal access token. Falls back to a token embedded in the
    /// repository URL, then the GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long)]
    /// REST API base URL. Derived from the repository host when unset.
    pub api_url: Option<String>,

    #[arg(long)]
    /// Path to the configuration file. Defaults to release-note.toml.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Print the release note without publishing it.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Configure the remote repository connection from CLI arguments, the
    /// config file and the environment, in that order of precedence.
    pub fn get_remote(&self, config: &Config) -> Result<RemoteConfig> {
        let repo = self
            .repo
            .as_deref()
            .or(config.repository.as_deref())
            .unwrap_or_default();

        let api_url = self.api_url.as_deref().or(config.api_url.as_deref());

        get_github_remote(
            repo,
            &self.token,
            env::var(TOKEN_ENV_VAR).ok(),
            api_url,
        )
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(NoteError::configuration(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(
    github_repo: &str,
    github_token: &str,
    env_token: Option<String>,
    api_url: Option<&str>,
) -> Result<RemoteConfig> {
    if github_repo.is_empty() {
        return Err(NoteError::configuration(
            "Missing repository url: pass --repo or set repository in the config file",
        ));
    }

    let parsed = GitUrl::parse(github_repo).map_err(|e| {
        NoteError::configuration(format!(
            "Invalid repository url {github_repo}: {e}"
        ))
    })?;

    validate_scheme(parsed.scheme)?;

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Some(env_var_token) = env_token
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(NoteError::configuration("Missing Github access token"));
    }

    let host = parsed.host.ok_or_else(|| {
        NoteError::configuration("unable to parse host from repository url")
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        NoteError::configuration("unable to parse owner from repository url")
    })?;

    if parsed.name.is_empty() {
        return Err(NoteError::configuration(
            "unable to parse repository name from repository url",
        ));
    }

    let scheme = parsed.scheme.to_string();

    let api_url = match api_url {
        Some(url) => {
            Url::parse(url)?.as_str().trim_end_matches('/').to_string()
        }
        None => default_api_url(&scheme, &host),
    };

    Ok(RemoteConfig {
        host,
        scheme,
        owner,
        repo: parsed.name,
        api_url,
        token: SecretString::from(token),
    })
}
