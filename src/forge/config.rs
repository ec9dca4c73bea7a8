//! Configuration for the hosting API connection.
use secrecy::SecretString;

/// Default page size for paginated tag and commit queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Public GitHub API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Remote repository connection configuration for authenticating and
/// interacting with the hosting API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Base URL of the REST API.
    pub api_url: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            api_url: GITHUB_API_URL.to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

/// API base URL for a repository host: the public endpoint for github.com,
/// the enterprise `/api/v3` path for anything else.
pub fn default_api_url(scheme: &str, host: &str) -> String {
    if host == "github.com" {
        GITHUB_API_URL.to_string()
    } else {
        format!("{scheme}://{host}/api/v3")
    }
}
