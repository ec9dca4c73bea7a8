//! Interface to the repository hosting API.
//!
//! Provides token-based authentication, tag and commit listing, and release
//! publishing through narrow traits the pipeline depends on.

/// Configuration and authentication for the hosting API.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Logging wrapper over the forge traits used by the pipeline.
pub mod manager;

/// Shared data types for tags and commits.
pub mod request;

/// Traits the pipeline consumes: tags, commits and release publishing.
pub mod traits;
