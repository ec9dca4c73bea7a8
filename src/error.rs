//! Custom error types for release-note generation.

use thiserror::Error;

/// Main error type for release-note operations.
#[derive(Error, Debug)]
pub enum NoteError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    // Lookup errors
    #[error("{0}")]
    NotFound(String),

    // Hosting API errors
    #[error("{method} {url} responded with status {status}")]
    Remote {
        method: String,
        url: String,
        status: u16,
    },

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    // TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using NoteError
pub type Result<T> = std::result::Result<T, NoteError>;

impl NoteError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a remote error from a failed hosting API call
    pub fn remote(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::Remote {
            method: method.into(),
            url: url.into(),
            status,
        }
    }
}

// Generic I/O errors (config file reads) land in the Other variant
impl From<std::io::Error> for NoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}
