//! Remote repository snapshots
//!
//! A [`RemoteRepo`] is an immutable snapshot of server state at query
//! time, not a live handle. Permissions and fork status may change
//! between the fetch and any action taken on it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::classify_api_error;
use crate::{GitHubClient, Result};

/// Snapshot of a repository on GitHub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRepo {
    /// "owner/name"
    pub full_name: String,
    /// Default branch name
    pub default_branch: String,
    /// SSH clone URL
    pub ssh_url: String,
    /// HTTPS clone URL
    pub clone_url: String,
    /// Whether the authenticated user can push to this repository
    pub push_permission: bool,
    /// The repository this one was forked from, if any
    pub parent: Option<Box<RemoteRepo>>,
}

impl RemoteRepo {
    /// Repository owner (the part of `full_name` before the slash)
    pub fn owner(&self) -> &str {
        self.full_name.split('/').next().unwrap_or(&self.full_name)
    }

    /// Repository name (the part of `full_name` after the slash)
    pub fn name(&self) -> &str {
        self.full_name
            .split('/')
            .nth(1)
            .unwrap_or(&self.full_name)
    }

    /// Whether this repository is a fork of another
    pub fn is_fork(&self) -> bool {
        self.parent.is_some()
    }
}

impl From<octocrab::models::Repository> for RemoteRepo {
    fn from(repo: octocrab::models::Repository) -> Self {
        let full_name = repo.full_name.unwrap_or_else(|| match &repo.owner {
            Some(owner) => format!("{}/{}", owner.login, repo.name),
            None => repo.name.clone(),
        });

        // The API includes these for repository GETs; the fallbacks only
        // cover sparse payloads such as nested parents.
        let ssh_url = repo
            .ssh_url
            .unwrap_or_else(|| format!("git@github.com:{}.git", full_name));
        let clone_url = repo
            .clone_url
            .map(|u| u.to_string())
            .unwrap_or_else(|| format!("https://github.com/{}.git", full_name));
        let default_branch = repo.default_branch.unwrap_or_else(|| "main".to_string());

        RemoteRepo {
            full_name,
            default_branch,
            ssh_url,
            clone_url,
            push_permission: repo.permissions.map(|p| p.push).unwrap_or(false),
            parent: repo.parent.map(|p| Box::new(RemoteRepo::from(*p))),
        }
    }
}

impl GitHubClient {
    /// Fetch a repository snapshot, including its fork parent if any
    pub async fn get_repo(&self, owner: &str, name: &str) -> Result<RemoteRepo> {
        debug!(owner, name, "Fetching repository");

        let repo = self
            .client()
            .repos(owner, name)
            .get()
            .await
            .map_err(|e| classify_api_error(e, &format!("{}/{}", owner, name)))?;

        Ok(repo.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn octocrab_repo(value: serde_json::Value) -> octocrab::models::Repository {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_full_payload() {
        let repo: RemoteRepo = octocrab_repo(json!({
            "id": 1,
            "name": "proj",
            "full_name": "alice/proj",
            "url": "https://api.github.com/repos/alice/proj",
            "default_branch": "main",
            "ssh_url": "git@github.com:alice/proj.git",
            "clone_url": "https://github.com/alice/proj.git",
            "permissions": { "admin": false, "push": true, "pull": true }
        }))
        .into();

        assert_eq!(repo.full_name, "alice/proj");
        assert_eq!(repo.owner(), "alice");
        assert_eq!(repo.name(), "proj");
        assert_eq!(repo.default_branch, "main");
        assert!(repo.push_permission);
        assert!(!repo.is_fork());
    }

    #[test]
    fn test_from_payload_with_parent() {
        let repo: RemoteRepo = octocrab_repo(json!({
            "id": 2,
            "name": "proj",
            "full_name": "alice/proj",
            "url": "https://api.github.com/repos/alice/proj",
            "default_branch": "main",
            "fork": true,
            "permissions": { "admin": false, "push": true, "pull": true },
            "parent": {
                "id": 1,
                "name": "proj",
                "full_name": "bob/proj",
                "url": "https://api.github.com/repos/bob/proj",
                "default_branch": "main",
                "clone_url": "https://github.com/bob/proj.git"
            }
        }))
        .into();

        assert!(repo.is_fork());
        let parent = repo.parent.unwrap();
        assert_eq!(parent.full_name, "bob/proj");
        assert_eq!(parent.clone_url, "https://github.com/bob/proj.git");
    }

    #[test]
    fn test_missing_permissions_means_no_push() {
        let repo: RemoteRepo = octocrab_repo(json!({
            "id": 3,
            "name": "proj",
            "full_name": "bob/proj",
            "url": "https://api.github.com/repos/bob/proj"
        }))
        .into();

        assert!(!repo.push_permission);
    }

    #[test]
    fn test_url_fallbacks_from_full_name() {
        let repo: RemoteRepo = octocrab_repo(json!({
            "id": 4,
            "name": "proj",
            "full_name": "bob/proj",
            "url": "https://api.github.com/repos/bob/proj"
        }))
        .into();

        assert_eq!(repo.ssh_url, "git@github.com:bob/proj.git");
        assert_eq!(repo.clone_url, "https://github.com/bob/proj.git");
    }
}
