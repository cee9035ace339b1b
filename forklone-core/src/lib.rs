//! Forklone Core - Core library for the forklone fork-and-clone tool
//!
//! This crate provides repository reference parsing, configuration and
//! token discovery, and the external `git` collaborator used to clone
//! repositories and wire up upstream remotes.

pub mod config;
pub mod error;
pub mod git;
pub mod repo_ref;
pub mod secrets;

pub use config::{CloneConfig, Config, ForkConfig};
pub use error::{Error, Result};
pub use repo_ref::{RepoInput, RepoRef};
pub use secrets::Secrets;
