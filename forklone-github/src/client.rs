//! GitHub API client using octocrab

use crate::{Error, Result};
use forklone_core::Secrets;
use octocrab::Octocrab;
use tracing::{debug, info};

/// GitHub API client for repository and fork operations
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client with a discovered token
    ///
    /// Token is loaded from (in priority order):
    /// 1. GH_TOKEN / GITHUB_TOKEN environment variables
    /// 2. ~/.config/forklone/secrets.toml
    /// 3. The hub.oauthtoken git config option
    pub fn new() -> Result<Self> {
        let token = Secrets::resolve_token()?;
        Self::with_token(token)
    }

    /// Create a GitHub client with an explicit token
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        debug!("Created GitHub client");

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Get the login of the authenticated user
    pub async fn viewer_login(&self) -> Result<String> {
        debug!("Fetching authenticated user");

        let user = self.client.current().user().await.map_err(|e| match e {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("Bad credentials") =>
            {
                Error::Auth("Invalid GitHub token".to_string())
            }
            other => Error::Api(other),
        })?;

        info!(login = %user.login, "Authenticated to GitHub");

        Ok(user.login)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

/// Map an octocrab error from a repository operation to our taxonomy
pub(crate) fn classify_api_error(err: octocrab::Error, repo: &str) -> Error {
    match err {
        octocrab::Error::GitHub { source, backtrace } => {
            if source.message.contains("Bad credentials") {
                Error::Auth("Invalid GitHub token".to_string())
            } else if source.status_code.as_u16() == 404
                || source.message.contains("Not Found")
            {
                Error::RepoNotFound(repo.to_string())
            } else {
                Error::Api(octocrab::Error::GitHub { source, backtrace })
            }
        }
        other => Error::Api(other),
    }
}
