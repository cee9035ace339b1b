//! Error types for GitHub operations

use std::time::Duration;

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Repository not found or not accessible
    #[error("Repository {0} not found or not accessible")]
    RepoNotFound(String),

    /// Fork did not become ready within the polling deadline
    #[error("Fork {repo} was not ready after {waited:?}")]
    ForkTimeout { repo: String, waited: Duration },

    /// Error from the core layer (reference parsing, credentials)
    #[error(transparent)]
    Core(#[from] forklone_core::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}
