//! Acquisition planning: decide whether to clone directly or fork first
//!
//! The decision pipeline runs three steps in sequence: resolve the
//! user-supplied reference to an owner/name pair, classify the caller's
//! access to the repository, and, when push access is missing, fork it
//! and wait for the fork to become clonable. The hosting service sits
//! behind the [`RepoHost`] trait so tests can script its responses.

use async_trait::async_trait;
use tracing::info;

use forklone_core::config::ForkConfig;
use forklone_core::{RepoInput, RepoRef};

use crate::fork::wait_until_ready;
use crate::{BranchStatus, GitHubClient, RemoteRepo, Result};

/// Hosting-service operations used by the acquisition pipeline
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Login of the authenticated identity
    async fn viewer_login(&self) -> Result<String>;

    /// Fetch a repository snapshot, including permissions and fork parent
    async fn get_repo(&self, owner: &str, name: &str) -> Result<RemoteRepo>;

    /// Request a fork under the given namespace (personal when `None`)
    async fn create_fork(
        &self,
        repo: &RemoteRepo,
        organization: Option<&str>,
    ) -> Result<RemoteRepo>;

    /// Probe whether a branch of the repository is queryable
    async fn branch_status(&self, repo: &RemoteRepo, branch: &str) -> Result<BranchStatus>;
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn viewer_login(&self) -> Result<String> {
        GitHubClient::viewer_login(self).await
    }

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RemoteRepo> {
        GitHubClient::get_repo(self, owner, name).await
    }

    async fn create_fork(
        &self,
        repo: &RemoteRepo,
        organization: Option<&str>,
    ) -> Result<RemoteRepo> {
        GitHubClient::create_fork(self, repo, organization).await
    }

    async fn branch_status(&self, repo: &RemoteRepo, branch: &str) -> Result<BranchStatus> {
        GitHubClient::branch_status(self, repo, branch).await
    }
}

/// Namespace to fork into
#[derive(Debug, Clone, Default)]
pub struct ForkTarget {
    /// Organization to own the fork; `None` means the caller's personal
    /// namespace (the server-side default)
    pub organization: Option<String>,
}

/// Terminal output of the acquisition pipeline
///
/// `upstream` is `Some` iff the clonee is a fork (pre-existing or just
/// created) of another repository; it is `None` iff the caller can push
/// to the clonee and the clonee has no parent.
#[derive(Debug, Clone)]
pub struct AcquisitionPlan {
    /// Repository to clone
    pub clonee: RemoteRepo,
    /// Repository to point the upstream remote at
    pub upstream: Option<RemoteRepo>,
}

/// Resolve a repository reference and plan its acquisition
///
/// With push access the repository itself is the clonee and its parent
/// (if any) becomes the upstream. Without push access a fork is
/// requested under `target`'s namespace and polled until clonable, and
/// the original repository becomes the upstream.
pub async fn acquire(
    host: &dyn RepoHost,
    reference: &str,
    target: &ForkTarget,
    poll: &ForkConfig,
) -> Result<AcquisitionPlan> {
    let repo_ref = match RepoInput::parse(reference)? {
        RepoInput::Qualified(r) => r,
        // Owner lookup is deferred to here so fully qualified references
        // never hit the identity endpoint.
        RepoInput::Bare(name) => {
            let login = host.viewer_login().await?;
            RepoRef::new(login, name)?
        }
    };

    let repo = host.get_repo(&repo_ref.owner, &repo_ref.name).await?;

    if repo.push_permission {
        info!(repo = %repo.full_name, "User has push permissions; not forking");
        let upstream = repo.parent.clone().map(|p| *p);
        return Ok(AcquisitionPlan {
            clonee: repo,
            upstream,
        });
    }

    info!(repo = %repo.full_name, organization = ?target.organization, "Forking repository");

    let fork = host
        .create_fork(&repo, target.organization.as_deref())
        .await?;

    wait_until_ready(host, &fork, &repo.default_branch, poll).await?;

    Ok(AcquisitionPlan {
        clonee: fork,
        upstream: Some(repo),
    })
}
