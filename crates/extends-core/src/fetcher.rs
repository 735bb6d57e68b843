//! The Reference Fetcher capability
//!
//! The engine only knows how to ask for "the config of `project` on
//! `branch`". Transports (HTTP, auth, retries) live behind this trait.

use crate::{Document, FetchError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Retrieves the config document of a project at a branch.
///
/// Implementations return [`FetchError::NotFound`] when the branch, project,
/// or config file does not exist. Whatever error is returned reaches the
/// caller of the resolution unchanged.
pub trait Fetcher {
    fn fetch(&self, branch: &str, project_path: &str) -> Result<Document, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, branch: &str, project_path: &str) -> Result<Document, FetchError> {
        (**self).fetch(branch, project_path)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&self, branch: &str, project_path: &str) -> Result<Document, FetchError> {
        (**self).fetch(branch, project_path)
    }
}

/// In-memory fetcher keyed by `branch:project`.
///
/// Every fetch hands out a fresh copy of the stored document and records
/// the request, so tests can check exactly which calls were made.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Document>,
    errors: HashMap<String, FetchError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `branch` / `project`
    pub fn with_document(
        mut self,
        branch: impl AsRef<str>,
        project: impl AsRef<str>,
        document: Document,
    ) -> Self {
        self.documents
            .insert(key(branch.as_ref(), project.as_ref()), document);
        self
    }

    /// Fail with `error` for `branch` / `project`; takes priority over documents
    pub fn with_error(
        mut self,
        branch: impl AsRef<str>,
        project: impl AsRef<str>,
        error: FetchError,
    ) -> Self {
        self.errors
            .insert(key(branch.as_ref(), project.as_ref()), error);
        self
    }

    /// `(branch, project)` pairs requested so far, in order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, branch: &str, project_path: &str) -> Result<Document, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((branch.to_string(), project_path.to_string()));

        let key = key(branch, project_path);
        if let Some(error) = self.errors.get(&key) {
            return Err(error.clone());
        }
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::not_found(branch, project_path))
    }
}

fn key(branch: &str, project: &str) -> String {
    format!("{branch}:{project}")
}
