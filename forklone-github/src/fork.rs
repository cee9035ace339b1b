//! Fork creation and readiness polling
//!
//! Fork creation is asynchronous on GitHub's side: the API call returns
//! immediately, but the fork's branches are not queryable until backend
//! replication finishes. Readiness is detected by polling the fork for
//! the original repository's default branch. A 404 means "not ready
//! yet"; any other error is fatal.

use std::time::Instant;

use tracing::{debug, info};

use forklone_core::config::ForkConfig;

use crate::client::classify_api_error;
use crate::{Error, GitHubClient, RemoteRepo, RepoHost, Result};

/// Outcome of a single fork readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    /// The branch exists; the fork is clonable
    Found,
    /// The branch is not queryable yet
    Missing,
}

impl GitHubClient {
    /// Request a fork of the repository
    ///
    /// GitHub is idempotent here: if a fork already exists under the
    /// target namespace, it is returned instead of a duplicate.
    pub async fn create_fork(
        &self,
        repo: &RemoteRepo,
        organization: Option<&str>,
    ) -> Result<RemoteRepo> {
        info!(repo = %repo.full_name, ?organization, "Requesting fork");

        let handler = self.client().repos(repo.owner(), repo.name());
        let mut builder = handler.create_fork();
        if let Some(org) = organization {
            builder = builder.organization(org);
        }

        let fork = builder
            .send()
            .await
            .map_err(|e| classify_api_error(e, &repo.full_name))?;

        Ok(fork.into())
    }

    /// Probe whether a branch of the repository is queryable
    pub async fn branch_status(&self, repo: &RemoteRepo, branch: &str) -> Result<BranchStatus> {
        let route = format!("/repos/{}/branches/{}", repo.full_name, branch);

        match self
            .client()
            .get::<serde_json::Value, _, ()>(&route, None::<&()>)
            .await
        {
            Ok(_) => Ok(BranchStatus::Found),
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code.as_u16() == 404 =>
            {
                Ok(BranchStatus::Missing)
            }
            Err(e) => Err(Error::Api(e)),
        }
    }
}

/// Poll a fork until its copy of the given branch becomes queryable
///
/// A `Missing` probe sleeps for `poll_interval` and retries; any probe
/// error aborts immediately. When `poll_deadline` is set, expiry surfaces
/// as [`Error::ForkTimeout`] — distinct from the fatal API errors, so
/// callers can tell "gave up waiting" from "the service rejected us".
pub async fn wait_until_ready(
    host: &dyn RepoHost,
    fork: &RemoteRepo,
    branch: &str,
    config: &ForkConfig,
) -> Result<()> {
    let started = Instant::now();

    debug!(fork = %fork.full_name, branch, "Waiting for fork to become clonable");

    loop {
        match host.branch_status(fork, branch).await? {
            BranchStatus::Found => {
                info!(
                    fork = %fork.full_name,
                    waited = ?started.elapsed(),
                    "Fork is ready"
                );
                return Ok(());
            }
            BranchStatus::Missing => {
                if let Some(deadline) = config.poll_deadline {
                    if started.elapsed() >= deadline {
                        return Err(Error::ForkTimeout {
                            repo: fork.full_name.clone(),
                            waited: started.elapsed(),
                        });
                    }
                }
                tokio::time::sleep(config.poll_interval).await;
            }
        }
    }
}
