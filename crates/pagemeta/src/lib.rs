//! Path-based page metadata resolution for web servers.
//!
//! This crate provides:
//! - [`MetaStore`]: Validated, immutable `path -> (title, description)` map
//! - [`Resolver`]: Ancestor-fallback lookup with translation and sanitization
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::BTreeMap;
//! use pagemeta::{MetaStore, Resolver, ResolveRequest};
//!
//! let mut raw = BTreeMap::new();
//! raw.insert(
//!     "/blog".to_owned(),
//!     serde_json::json!(["Blog", "Articles and updates"]),
//! );
//! let resolver = Resolver::new(MetaStore::from_raw(raw)?);
//!
//! // Unconfigured child paths fall back to the nearest configured ancestor.
//! let meta = resolver.resolve(&ResolveRequest::new("/blog/2024/hello"))?;
//! assert_eq!(meta.title, "Blog");
//! # Ok(())
//! # }
//! ```
//!
//! # Resolution
//!
//! Lookups walk up the path hierarchy (`/blog/123` → `/blog` → `/`) and
//! return the first configured entry. Values are passed through an optional
//! [`Translate`] implementation and always stripped of markup before being
//! returned. A miss that reaches a top-level segment is reported as
//! [`ResolveError::NotFound`] so the hosting server can decide between
//! propagating and falling back to the root entry.

pub(crate) mod resolver;
pub(crate) mod sanitize;
pub(crate) mod store;
mod translate;

pub use resolver::{ResolveError, ResolveRequest, ResolvedMeta, Resolver};
pub use sanitize::strip_markup;
pub use store::{MetaEntry, MetaStore, StoreError};
pub use translate::Translate;
