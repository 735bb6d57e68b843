//! Parent references and the `extends` declaration
//!
//! Grammar accepted for a single reference:
//!
//! ```text
//! reference    := "gitlab" branch-part? ">" project-path
//! branch-part  := "@" branch-name
//! ```
//!
//! Without a branch part the reference resolves against [`DEFAULT_BRANCH`].

use crate::document::value_kind;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;

/// Scheme prefix of the only supported host
pub const GITLAB_SCHEME: &str = "gitlab";

/// Branch used when a reference names none
pub const DEFAULT_BRANCH: &str = "main";

/// A parsed parent reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    raw: String,
    branch: String,
    project: String,
}

impl Reference {
    /// Parse a reference string.
    ///
    /// `gitlab>group/project` targets `main`; `gitlab@dev>group/project`
    /// targets `dev`. Other schemes fail with [`Error::UnsupportedReference`].
    /// A `gitlab@` form with no `>`, or with an empty branch or project,
    /// fails with [`Error::InvalidSyntax`].
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidSyntax {
            reference: raw.to_string(),
        };

        let rest = raw
            .strip_prefix(GITLAB_SCHEME)
            .ok_or_else(|| Error::UnsupportedReference {
                reference: raw.to_string(),
            })?;

        let (branch, project) = if let Some(spec) = rest.strip_prefix('@') {
            let (branch, project) = spec.split_once('>').ok_or_else(invalid)?;
            if branch.is_empty() {
                return Err(invalid());
            }
            (branch, project)
        } else if let Some(project) = rest.strip_prefix('>') {
            (DEFAULT_BRANCH, project)
        } else {
            // e.g. "gitlabfoo>bar": a different scheme that merely shares the prefix
            return Err(Error::UnsupportedReference {
                reference: raw.to_string(),
            });
        };

        if project.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            raw: raw.to_string(),
            branch: branch.to_string(),
            project: project.to_string(),
        })
    }

    /// The reference exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn project(&self) -> &str {
        &self.project
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Normalize an `extends` value into an ordered list of reference strings.
///
/// A string becomes a one-element list. An array is accepted only if every
/// element is a string. Anything else yields `None`, never a partial list.
pub fn to_reference_sequence(raw: &Value) -> Option<Vec<String>> {
    match raw {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

/// [`to_reference_sequence`], failing with [`Error::InvalidExtends`].
pub(crate) fn extends_list(raw: &Value) -> Result<Vec<String>> {
    to_reference_sequence(raw).ok_or_else(|| Error::InvalidExtends {
        found: value_kind(raw),
    })
}
