//! Generates a categorized release note from the commits between two tags
//! and publishes it as a release on the hosting API.
pub mod analyzer;
pub mod cli;
pub mod config;
mod error;
pub mod forge;
pub mod orchestrator;

pub use error::{NoteError, Result};
pub use orchestrator::{Orchestrator, OrchestratorConfig, ReleaseNote};
