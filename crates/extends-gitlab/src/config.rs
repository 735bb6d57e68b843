//! Settings for the GitLab fetcher

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public GitLab API root
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// Repository file holding a project's config
pub const DEFAULT_FILE_PATH: &str = ".gitlab/renovate.json";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_MAX_RETRY_ELAPSED_MS: u64 = 10_000;

/// How to reach GitLab and which file to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// API root, e.g. `https://gitlab.example.com/api/v4`
    pub base_url: String,

    /// Access token sent as `PRIVATE-TOKEN`; anonymous when `None`
    pub token: Option<String>,

    /// Path of the config file inside each project
    pub file_path: String,

    /// Per-request timeout in milliseconds; must be non-zero
    pub timeout_ms: u64,

    /// Milliseconds spent retrying transient failures; `0` disables retries
    pub max_retry_elapsed_ms: u64,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            file_path: DEFAULT_FILE_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retry_elapsed_ms: DEFAULT_MAX_RETRY_ELAPSED_MS,
        }
    }
}

impl GitLabConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = duration_ms(timeout);
        self
    }

    pub fn with_max_retry_elapsed(mut self, elapsed: Duration) -> Self {
        self.max_retry_elapsed_ms = duration_ms(elapsed);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn max_retry_elapsed(&self) -> Duration {
        Duration::from_millis(self.max_retry_elapsed_ms)
    }

    /// The token, ignoring empty strings
    pub(crate) fn effective_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
