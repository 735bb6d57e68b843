//! Resolution engine for layered configuration documents
//!
//! A config document may declare one or more parents in its `extends` field:
//!
//! ```json
//! {
//!   "extends": ["gitlab>group/renovate-config", "gitlab@dev>group/base"],
//!   "rules": { "maxLen": 100 }
//! }
//! ```
//!
//! Resolution fetches every parent through a [`Fetcher`], resolves the
//! parents' own `extends` recursively, deep-merges them in declaration order
//! and finally overlays the document's local fields.
//!
//! # Precedence
//!
//! Later references override earlier ones; local fields override all parents.
//! Objects merge key by key, everything else (arrays included) is replaced.
//!
//! # Example
//!
//! ```
//! use extends_core::{MemoryFetcher, resolve_config_str};
//! use serde_json::json;
//!
//! let fetcher = MemoryFetcher::new()
//!     .with_document("main", "ns/renovate-config", json!({"rules": {"indent": 2}}).as_object().cloned().unwrap())
//!     .with_document("dev", "ns/base", json!({"rules": {"quotes": "single"}}).as_object().cloned().unwrap());
//!
//! let resolved = resolve_config_str(
//!     r#"{"extends": ["gitlab>ns/renovate-config", "gitlab@dev>ns/base"], "rules": {"maxLen": 100}}"#,
//!     &fetcher,
//! )
//! .unwrap();
//!
//! assert_eq!(resolved["rules"], json!({"indent": 2, "quotes": "single", "maxLen": 100}));
//! ```

pub mod document;
pub mod error;
pub mod fetcher;
pub mod merge;
pub mod reference;
pub mod resolver;

pub use document::{Document, EXTENDS_KEY, parse_document};
pub use error::{Error, FetchError, Result};
pub use fetcher::{Fetcher, MemoryFetcher};
pub use merge::{merge, merge_value};
pub use reference::{DEFAULT_BRANCH, GITLAB_SCHEME, Reference, to_reference_sequence};
pub use resolver::{Resolver, VisitedSet, resolve, resolve_config_str};
