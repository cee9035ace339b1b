//! Repository reference parsing
//!
//! A GitHub repository can be referenced in four ways:
//! - `https://github.com/owner/name` (optionally `.git` and a trailing slash)
//! - `git@github.com:owner/name.git`
//! - `owner/name`
//! - `name` (owner defaults to the authenticated user)
//!
//! Parsing is purely syntactic; resolving a bare name to an owner is the
//! caller's job, so the identity lookup stays lazy.

use std::fmt;

use crate::{Error, Result};

/// A fully qualified repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Build a reference, validating both identifiers
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();

        if !is_valid_owner(&owner) || !is_valid_name(&name) {
            return Err(Error::InvalidRef(format!("{}/{}", owner, name)));
        }

        Ok(Self { owner, name })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A parsed repository reference, before owner defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoInput {
    /// Owner and name both given
    Qualified(RepoRef),
    /// Name only; owner comes from the authenticated identity
    Bare(String),
}

impl RepoInput {
    /// Parse a free-form repository reference
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(Error::InvalidRef(input.to_string()));
        }

        // Web URL: https://github.com/owner/name[.git][/]
        if input.starts_with("https://") || input.starts_with("http://") {
            let parsed =
                url::Url::parse(input).map_err(|_| Error::InvalidRef(input.to_string()))?;

            match parsed.host_str() {
                Some("github.com") | Some("www.github.com") => {}
                _ => return Err(Error::InvalidRef(input.to_string())),
            }

            let path = parsed
                .path()
                .trim_start_matches('/')
                .trim_end_matches('/')
                .trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() == 2 {
                return Ok(RepoInput::Qualified(RepoRef::new(parts[0], parts[1])?));
            }
            return Err(Error::InvalidRef(input.to_string()));
        }

        // SSH URL: git@github.com:owner/name[.git]
        if let Some(rest) = input.strip_prefix("git@github.com:") {
            let path = rest.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() == 2 {
                return Ok(RepoInput::Qualified(RepoRef::new(parts[0], parts[1])?));
            }
            return Err(Error::InvalidRef(input.to_string()));
        }

        // owner/name shorthand
        if input.contains('/') {
            let parts: Vec<&str> = input.split('/').collect();
            if parts.len() == 2 {
                let name = parts[1].trim_end_matches(".git");
                return Ok(RepoInput::Qualified(RepoRef::new(parts[0], name)?));
            }
            return Err(Error::InvalidRef(input.to_string()));
        }

        // Bare name
        if is_valid_name(input) {
            return Ok(RepoInput::Bare(input.to_string()));
        }

        Err(Error::InvalidRef(input.to_string()))
    }

    /// Qualify the reference, filling in the default owner for bare names
    pub fn with_default_owner(self, owner: &str) -> Result<RepoRef> {
        match self {
            RepoInput::Qualified(r) => Ok(r),
            RepoInput::Bare(name) => RepoRef::new(owner, name),
        }
    }
}

/// GitHub login: alphanumeric and hyphens, no leading/trailing hyphen
fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && !owner.starts_with('-')
        && !owner.ends_with('-')
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Repository name: alphanumeric, `-`, `_`, `.`; `.` and `..` are reserved
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
