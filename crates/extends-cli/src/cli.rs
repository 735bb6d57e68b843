//! CLI argument parsing using clap derive

use clap::Parser;
use extends_gitlab::{DEFAULT_BASE_URL, DEFAULT_FILE_PATH, GitLabConfig};
use std::path::PathBuf;

/// Resolve a JSON config and everything it extends into one document
#[derive(Parser, Debug)]
#[command(name = "extends")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// GitLab API base URL
    #[arg(long, env = "GITLAB_URL", default_value = DEFAULT_BASE_URL)]
    pub gitlab_url: String,

    /// GitLab access token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub gitlab_token: Option<String>,

    /// Config file path inside each referenced project
    #[arg(long, default_value = DEFAULT_FILE_PATH)]
    pub file_path: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Seconds to keep retrying transient GitLab failures (0 disables retries)
    #[arg(long, default_value_t = 10)]
    pub max_retry_elapsed: u64,

    /// Print the resolved config on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fetcher settings described by the flags
    pub fn gitlab_config(&self) -> GitLabConfig {
        GitLabConfig {
            base_url: self.gitlab_url.clone(),
            token: self.gitlab_token.clone(),
            file_path: self.file_path.clone(),
            timeout_ms: self.timeout.saturating_mul(1_000),
            max_retry_elapsed_ms: self.max_retry_elapsed.saturating_mul(1_000),
        }
    }
}
