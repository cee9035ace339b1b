//! External `git` collaborator: cloning and upstream remote setup
//!
//! All operations shell out to the `git` executable with inherited stdio,
//! so git's own progress and diagnostics reach the user directly. A
//! non-zero exit becomes [`Error::GitCommand`] carrying the status, which
//! the CLI propagates verbatim.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::{Error, Result};

/// Split a pass-through options string into individual arguments
///
/// Example: `"--depth 1 --quiet"` becomes `["--depth", "1", "--quiet"]`.
/// Splitting is on whitespace; quoted arguments are not supported.
pub fn split_clone_opts(opts: &str) -> Vec<String> {
    opts.split_whitespace().map(|s| s.to_string()).collect()
}

/// Clone a repository into the given directory
pub fn clone(url: &str, directory: &Path, extra_opts: &[String]) -> Result<()> {
    let mut args: Vec<&OsStr> = vec![OsStr::new("clone")];
    for opt in extra_opts {
        args.push(OsStr::new(opt));
    }
    args.push(OsStr::new(url));
    args.push(directory.as_os_str());

    run_git(&args)
}

/// Configure a remote pointing at the upstream repository
///
/// When the chosen name collides with the default `origin` remote created
/// by the clone, that remote is removed first. The new remote is added
/// with `-f` so its refs are fetched immediately.
pub fn set_upstream_remote(directory: &Path, name: &str, url: &str) -> Result<()> {
    if name == "origin" {
        run_git(&[
            OsStr::new("-C"),
            directory.as_os_str(),
            OsStr::new("remote"),
            OsStr::new("rm"),
            OsStr::new("origin"),
        ])?;
    }

    run_git(&[
        OsStr::new("-C"),
        directory.as_os_str(),
        OsStr::new("remote"),
        OsStr::new("add"),
        OsStr::new("-f"),
        OsStr::new(name),
        OsStr::new(url),
    ])
}

/// Run `git` with the given arguments, inheriting stdio
fn run_git(args: &[&OsStr]) -> Result<()> {
    debug!(?args, "Running git");

    let status = Command::new("git")
        .args(args)
        .status()
        .map_err(|e| Error::Other(format!("Failed to run git: {}", e)))?;

    if !status.success() {
        return Err(Error::GitCommand {
            program: "git".to_string(),
            code: status.code().unwrap_or(1),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clone_opts() {
        assert_eq!(
            split_clone_opts("--depth 1 --quiet"),
            vec!["--depth", "1", "--quiet"]
        );
        assert!(split_clone_opts("").is_empty());
        assert!(split_clone_opts("   ").is_empty());
    }

    #[test]
    fn test_clone_failure_carries_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clone");

        let err = clone(
            "/nonexistent/forklone-test-repo",
            &target,
            &["--quiet".to_string()],
        )
        .unwrap_err();

        match err {
            Error::GitCommand { code, .. } => assert_ne!(code, 0),
            other => panic!("expected GitCommand error, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_and_upstream_remote() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");

        // Seed a local repository to clone from
        std::fs::create_dir(&source).unwrap();
        let init = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(&source)
            .status()
            .unwrap();
        assert!(init.success());
        let commit = Command::new("git")
            .args([
                "-c",
                "user.email=test@example.com",
                "-c",
                "user.name=test",
                "commit",
                "--allow-empty",
                "--quiet",
                "-m",
                "init",
            ])
            .current_dir(&source)
            .status()
            .unwrap();
        assert!(commit.success());

        let target = dir.path().join("clone");
        let source_url = source.to_string_lossy().to_string();
        clone(&source_url, &target, &["--quiet".to_string()]).unwrap();
        assert!(target.join(".git").exists());

        set_upstream_remote(&target, "upstream", &source_url).unwrap();

        let output = Command::new("git")
            .args(["-C", target.to_str().unwrap(), "remote"])
            .output()
            .unwrap();
        let remotes = String::from_utf8_lossy(&output.stdout);
        assert!(remotes.contains("upstream"));
        assert!(remotes.contains("origin"));
    }

    #[test]
    fn test_origin_collision_replaces_remote() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");

        std::fs::create_dir(&source).unwrap();
        let init = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(&source)
            .status()
            .unwrap();
        assert!(init.success());
        let commit = Command::new("git")
            .args([
                "-c",
                "user.email=test@example.com",
                "-c",
                "user.name=test",
                "commit",
                "--allow-empty",
                "--quiet",
                "-m",
                "init",
            ])
            .current_dir(&source)
            .status()
            .unwrap();
        assert!(commit.success());

        let target = dir.path().join("clone");
        let source_url = source.to_string_lossy().to_string();
        clone(&source_url, &target, &["--quiet".to_string()]).unwrap();

        // Re-pointing "origin" removes the clone's origin first
        set_upstream_remote(&target, "origin", &source_url).unwrap();

        let output = Command::new("git")
            .args(["-C", target.to_str().unwrap(), "remote"])
            .output()
            .unwrap();
        let remotes = String::from_utf8_lossy(&output.stdout);
        assert_eq!(remotes.trim(), "origin");
    }
}
