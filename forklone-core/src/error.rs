//! Error types for forklone core operations

use thiserror::Error;

/// Result type alias for forklone core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forklone core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository reference did not match any accepted format
    #[error(
        "Invalid repository reference: {0}. Expected format: \
         https://github.com/owner/name, git@github.com:owner/name.git, \
         owner/name, or name"
    )]
    InvalidRef(String),

    /// No GitHub token could be discovered
    #[error(
        "GitHub token not found. Set GH_TOKEN or GITHUB_TOKEN, add a token \
         to ~/.config/forklone/secrets.toml, or set the hub.oauthtoken git \
         config option"
    )]
    CredentialNotFound,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external command exited with a non-zero status
    #[error("{program} exited with status {code}")]
    GitCommand { program: String, code: i32 },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The exit status of a failed external command, if that is what
    /// this error represents. The CLI propagates it verbatim so the
    /// underlying tool's diagnostic is what the user sees.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::GitCommand { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_git_command() {
        let err = Error::GitCommand {
            program: "git".to_string(),
            code: 128,
        };
        assert_eq!(err.exit_code(), Some(128));
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        assert_eq!(Error::CredentialNotFound.exit_code(), None);
        assert_eq!(Error::InvalidRef("x".to_string()).exit_code(), None);
    }
}
