//! Recursive resolution of `extends`
//!
//! For each reference, in declaration order, the resolver fetches the parent,
//! resolves the parent's own `extends` first, then folds the result into an
//! accumulator. The document's local fields are overlaid last.
//!
//! One [`VisitedSet`] spans the whole walk. A reference seen anywhere earlier
//! in the same resolution is reported as circular, even when it was reached
//! through a sibling rather than an ancestor.

use crate::document::{EXTENDS_KEY, parse_document};
use crate::merge::merge;
use crate::reference::{Reference, extends_list};
use crate::{Document, Error, Fetcher, Result};
use std::collections::HashSet;

/// Reference strings consumed during one top-level resolution
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.seen.contains(reference)
    }

    /// Record a reference; returns `false` if it was already present
    pub fn insert(&mut self, reference: &str) -> bool {
        self.seen.insert(reference.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Resolves documents against a single fetcher
///
/// # Example
///
/// ```
/// use extends_core::{MemoryFetcher, Resolver};
/// use serde_json::json;
///
/// let base = json!({"rules": {"indent": 2}}).as_object().cloned().unwrap();
/// let fetcher = MemoryFetcher::new().with_document("main", "ns/base", base);
///
/// let resolved = Resolver::new(&fetcher)
///     .resolve_str(r#"{"extends": "gitlab>ns/base", "rules": {"maxLen": 100}}"#)
///     .unwrap();
///
/// assert_eq!(resolved["rules"], json!({"indent": 2, "maxLen": 100}));
/// ```
#[derive(Debug)]
pub struct Resolver<'f, F: ?Sized> {
    fetcher: &'f F,
}

impl<'f, F: Fetcher + ?Sized> Resolver<'f, F> {
    pub fn new(fetcher: &'f F) -> Self {
        Self { fetcher }
    }

    /// Parse JSON text and resolve it with a fresh visited set
    pub fn resolve_str(&self, text: &str) -> Result<Document> {
        let document = parse_document(text)?;
        self.resolve(document)
    }

    /// Resolve with a fresh visited set
    pub fn resolve(&self, document: Document) -> Result<Document> {
        let mut visited = VisitedSet::new();
        self.resolve_with_visited(document, &mut visited)
    }

    /// Resolve, recording every consumed reference in `visited`
    pub fn resolve_with_visited(
        &self,
        document: Document,
        visited: &mut VisitedSet,
    ) -> Result<Document> {
        resolve_at_depth(document, visited, self.fetcher, 0)
    }
}

/// Resolve `document`'s `extends` chain into one merged document.
///
/// The document is consumed. On any error nothing is returned but the
/// error; `visited` may hold references recorded before the failure.
pub fn resolve<F: Fetcher + ?Sized>(
    document: Document,
    visited: &mut VisitedSet,
    fetcher: &F,
) -> Result<Document> {
    resolve_at_depth(document, visited, fetcher, 0)
}

/// Parse `text` as a JSON object and resolve it.
///
/// Malformed text fails before the fetcher is called.
pub fn resolve_config_str<F: Fetcher + ?Sized>(text: &str, fetcher: &F) -> Result<Document> {
    Resolver::new(fetcher).resolve_str(text)
}

fn resolve_at_depth<F: Fetcher + ?Sized>(
    mut document: Document,
    visited: &mut VisitedSet,
    fetcher: &F,
    depth: usize,
) -> Result<Document> {
    let Some(raw_extends) = document.remove(EXTENDS_KEY) else {
        return Ok(document);
    };
    let references = extends_list(&raw_extends)?;

    let mut merged = Document::new();
    for raw in references {
        if !visited.insert(&raw) {
            tracing::debug!(reference = %raw, depth, "Reference already visited");
            return Err(Error::CircularReference { reference: raw });
        }

        let reference = Reference::parse(&raw)?;
        tracing::debug!(
            reference = %reference,
            branch = reference.branch(),
            project = reference.project(),
            depth,
            "Fetching parent config"
        );
        let fetched = fetcher.fetch(reference.branch(), reference.project())?;

        // Parents resolve their own ancestors before joining the accumulator
        let parent = resolve_at_depth(fetched, visited, fetcher, depth + 1)?;
        merged = merge(&merged, &parent);
        tracing::trace!(reference = %reference, keys = merged.len(), "Merged parent config");
    }

    Ok(merge(&merged, &document))
}
