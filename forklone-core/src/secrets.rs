//! GitHub token discovery for forklone
//!
//! Tokens are stored separately from configuration to avoid accidental
//! sharing. The secrets file is located at `~/.config/forklone/secrets.toml`
//! and must have restrictive permissions (0600 on Unix).
//!
//! Discovery priority:
//! 1. Environment variables (GH_TOKEN, then GITHUB_TOKEN)
//! 2. Secrets file (~/.config/forklone/secrets.toml)
//! 3. The `hub.oauthtoken` git config option

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub configuration
    pub github: GitHubSecrets,
}

/// GitHub-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// GitHub Personal Access Token
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Check if file is readable by group or others (mode & 0o077)
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        // Trim whitespace from token
        if let Some(ref mut token) = secrets.github.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/forklone/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("forklone").join("secrets.toml"))
    }

    /// Get GitHub token with environment variable override
    ///
    /// Priority: GH_TOKEN > GITHUB_TOKEN > secrets file > hub.oauthtoken
    pub fn github_token(&self) -> Option<String> {
        // Check environment variables first
        for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
            if let Ok(token) = std::env::var(var) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    debug!(var, "Using GitHub token from environment variable");
                    return Some(token);
                }
            }
        }

        // Fall back to secrets file
        if let Some(ref token) = self.github.token {
            if !token.is_empty() {
                debug!("Using GitHub token from secrets file");
                return Some(token.clone());
            }
        }

        // Last resort: the hub.oauthtoken git config option
        if let Some(token) = hub_oauthtoken() {
            debug!("Using GitHub token from hub.oauthtoken git config");
            return Some(token);
        }

        None
    }

    /// Resolve a token, failing with a remediation hint if none is found
    pub fn resolve_token() -> Result<String> {
        Self::load()?.github_token().ok_or(Error::CredentialNotFound)
    }
}

/// Read the `hub.oauthtoken` git config key, if set
fn hub_oauthtoken() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "hub.oauthtoken"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secrets() {
        let secrets = Secrets::default();
        assert!(secrets.github.token.is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[github]
token = "ghp_xxxxxxxxxxxx"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.github.token, Some("ghp_xxxxxxxxxxxx".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "[github]\ntoken = \"ghp_x\"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(Secrets::load_from_file(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_file_token_trimmed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "[github]\ntoken = \"  ghp_x  \"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        let secrets = Secrets::load_from_file(&path).unwrap();
        assert_eq!(secrets.github.token, Some("ghp_x".to_string()));
    }
}
