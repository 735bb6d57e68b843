//! GitLab-backed [`Fetcher`](extends_core::Fetcher)
//!
//! Resolves `gitlab>group/project` references by reading each project's
//! config file (`.gitlab/renovate.json` by default) through the GitLab API.

pub mod config;
pub mod fetcher;

pub use config::{DEFAULT_BASE_URL, DEFAULT_FILE_PATH, GitLabConfig};
pub use fetcher::GitLabFetcher;
