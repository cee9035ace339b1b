//! Forklone GitHub - GitHub integration for forklone
//!
//! This crate provides GitHub API access for resolving repositories and
//! the caller's permissions on them, creating forks, and waiting for a
//! fresh fork to become clonable.

mod acquire;
mod client;
mod error;
mod fork;
mod repo;

pub use acquire::{acquire, AcquisitionPlan, ForkTarget, RepoHost};
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use fork::{wait_until_ready, BranchStatus};
pub use repo::RemoteRepo;
