//! Forklone CLI - fork (when needed) and clone a GitHub repository
//!
//! If the user has push permissions to the given repository, it is cloned
//! directly; if it is a fork, the clone's upstream remote points at the
//! parent. Otherwise the repository is forked (or a pre-existing fork is
//! reused), the fork is cloned once it is ready, and the upstream remote
//! points at the original repository.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use forklone_core::{git, Config, Error as CoreError};
use forklone_github::{acquire, ForkTarget, GitHubClient};

/// Fork & clone a GitHub repository
///
/// A repository can be referenced as https://github.com/OWNER/NAME,
/// OWNER/NAME, or NAME (owned by the authenticating user). A GitHub
/// access token is required: set GH_TOKEN or GITHUB_TOKEN, add a token
/// to ~/.config/forklone/secrets.toml, or set the hub.oauthtoken git
/// config option.
#[derive(Parser, Debug)]
#[command(name = "forklone")]
#[command(author, version, about)]
struct Cli {
    /// Repository to clone (URL, owner/name, or name)
    repository: String,

    /// Directory to clone into (defaults to the repository name)
    directory: Option<PathBuf>,

    /// Pass the given options to the `git clone` command.
    /// Example: --clone-opts="--depth 1 --quiet"
    #[arg(long, value_name = "OPTIONS", allow_hyphen_values = true)]
    clone_opts: Option<String>,

    /// Fork the repository within the given organization
    #[arg(long, value_name = "ORGANIZATION")]
    org: Option<String>,

    /// Use the given name for the remote for the parent repository
    #[arg(short = 'U', long, value_name = "NAME")]
    upstream_remote: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; verbose mode raises the default level
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(err) = run(cli).await {
        // A failed git invocation already printed its own diagnostic;
        // propagate its status instead of re-wrapping it.
        if let Some(code) = err
            .downcast_ref::<CoreError>()
            .and_then(|e| e.exit_code())
        {
            std::process::exit(code);
        }

        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_with_overrides(cli.upstream_remote.clone())?;

    let client = GitHubClient::new()?;
    let target = ForkTarget {
        organization: cli.org.clone(),
    };

    let plan = acquire(&client, &cli.repository, &target, &config.fork).await?;

    let directory = cli
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(plan.clonee.name()));

    let clone_opts = cli
        .clone_opts
        .as_deref()
        .map(git::split_clone_opts)
        .unwrap_or_default();

    tracing::info!(
        repo = %plan.clonee.full_name,
        directory = %directory.display(),
        "Cloning"
    );
    git::clone(&plan.clonee.ssh_url, &directory, &clone_opts)?;

    if let Some(upstream) = &plan.upstream {
        let remote = &config.clone.upstream_remote;
        tracing::info!(
            remote = %remote,
            upstream = %upstream.full_name,
            "Pointing remote to parent repo"
        );
        git::set_upstream_remote(&directory, remote, &upstream.clone_url)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_positionals_and_flags() {
        let cli = Cli::parse_from([
            "forklone",
            "--clone-opts",
            "--depth 1",
            "--org",
            "myorg",
            "-U",
            "parent",
            "bob/proj",
            "dest",
        ]);

        assert_eq!(cli.repository, "bob/proj");
        assert_eq!(cli.directory, Some(PathBuf::from("dest")));
        assert_eq!(cli.clone_opts.as_deref(), Some("--depth 1"));
        assert_eq!(cli.org.as_deref(), Some("myorg"));
        assert_eq!(cli.upstream_remote.as_deref(), Some("parent"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["forklone", "proj"]);

        assert_eq!(cli.repository, "proj");
        assert!(cli.directory.is_none());
        assert!(cli.clone_opts.is_none());
        assert!(cli.org.is_none());
        assert!(cli.upstream_remote.is_none());
        assert!(!cli.verbose);
    }
}
