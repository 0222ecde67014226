//! Command-line argument parsing for Naimo Tools
//!
//! Two independent subcommands: `fetch` downloads a GitHub branch archive,
//! `serve` runs the static test file server.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::DownloadRequest;

/// Naimo Tools - developer utilities for the Naimo project
#[derive(Parser, Debug)]
#[command(
    name = "naimo_tools",
    version,
    about = "Download GitHub branch archives and serve files for browser testing",
    long_about = "Developer utilities for the Naimo project.

  fetch  Download the ZIP archive of one branch of a GitHub repository.
  serve  Serve a directory over HTTP with CORS enabled and caching disabled."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a branch archive from GitHub
    Fetch(FetchArgs),

    /// Serve a directory for manual browser testing
    Serve(ServeArgs),
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Repository owner (user or organisation)
    pub owner: String,

    /// Repository name
    pub repository: String,

    /// Branch to download
    pub branch: String,

    /// Output file (default: <repository>-<branch>.zip)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Access token for private repositories (falls back to $GITHUB_TOKEN)
    #[arg(short, long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Archive host to download from
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the serve command
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Port to listen on (default: 8000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Address to bind (default: 0.0.0.0)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl FetchArgs {
    /// Output path, defaulting to `<repository>-<branch>.zip`
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(DownloadRequest::default_output_name(
                &self.repository,
                &self.branch,
            ))
        })
    }

    /// Build the download request, using `env_token` when no `--token` is given
    pub fn to_request(&self, env_token: Option<String>) -> DownloadRequest {
        DownloadRequest::new(
            self.owner.clone(),
            self.repository.clone(),
            self.branch.clone(),
            self.output_path(),
        )
        .with_token(self.token.clone().or(env_token))
    }
}
