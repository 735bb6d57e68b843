//! Error types for extends-core

/// Result type for extends-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text is not valid JSON
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// The input parsed, but the top-level value is not an object
    #[error("invalid JSON: expected an object, found {found}")]
    NotAnObject { found: &'static str },

    /// `extends` is neither a string nor an array of strings
    #[error("extends must be a string or array of strings, found {found}")]
    InvalidExtends { found: &'static str },

    /// A reference was reached twice during one resolution
    #[error("circular reference detected: {reference}")]
    CircularReference { reference: String },

    /// The reference uses a scheme other than `gitlab`
    #[error("unsupported extend: {reference}")]
    UnsupportedReference { reference: String },

    /// A `gitlab@` reference without its `>` separator
    #[error("invalid extends syntax: {reference}")]
    InvalidSyntax { reference: String },

    /// Error raised by the fetcher, surfaced as-is
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors a [`Fetcher`](crate::Fetcher) may report.
///
/// The engine never inspects these; they pass through to the caller of
/// `resolve` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No config exists for this branch and project
    #[error("failed to fetch {project}@{branch}: not found")]
    NotFound { branch: String, project: String },

    /// The host rejected the credentials
    #[error("failed to fetch {project}@{branch}: unauthorized")]
    Unauthorized { branch: String, project: String },

    /// The host answered with an unexpected status
    #[error("failed to fetch {project}@{branch}: HTTP {status}")]
    Http {
        status: u16,
        branch: String,
        project: String,
    },

    /// The request never produced a response
    #[error("failed to fetch: {message}")]
    Transport { message: String },

    /// The fetched file is not a JSON object
    #[error("invalid JSON in {project}@{branch}: {message}")]
    InvalidDocument {
        branch: String,
        project: String,
        message: String,
    },
}

impl FetchError {
    pub fn not_found(branch: impl Into<String>, project: impl Into<String>) -> Self {
        Self::NotFound {
            branch: branch.into(),
            project: project.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether this is the "does not exist" class of failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_reference_names_the_reference() {
        let error = Error::CircularReference {
            reference: "gitlab>foo/bar".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "circular reference detected: gitlab>foo/bar"
        );
    }

    #[test]
    fn fetch_errors_display_without_extra_context() {
        let error: Error = FetchError::not_found("main", "not/exist").into();
        assert_eq!(error.to_string(), "failed to fetch not/exist@main: not found");
    }

    #[test]
    fn invalid_json_wraps_the_parse_error() {
        let source = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
        let error = Error::InvalidJson { source };
        assert!(error.to_string().starts_with("invalid JSON: "));
        assert!(std::error::Error::source(&error).is_some());
    }
}
