//! Ancestor-fallback metadata resolution.
//!
//! Walks up the path hierarchy in a [`MetaStore`] until a configured
//! entry is found, then applies translation and markup stripping to the
//! title and description of that entry only.

use serde::Serialize;

use crate::sanitize::strip_markup;
use crate::store::MetaStore;
use crate::translate::Translate;

/// HTML entity substituted for `|` before translation, so catalogs that
/// treat the pipe as a plural/range separator see it as plain text.
const PIPE_ENTITY: &str = "&#124;";

/// A single resolution request.
///
/// `path` is required; everything else defaults to off. The original
/// path is carried separately from the path currently being tried so
/// error reporting can name both once ancestors have been consulted.
#[derive(Clone, Copy)]
pub struct ResolveRequest<'a> {
    path: &'a str,
    translator: Option<&'a dyn Translate>,
    original_path: Option<&'a str>,
    status: Option<u16>,
}

impl<'a> ResolveRequest<'a> {
    /// Request metadata for `path`.
    #[must_use]
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            translator: None,
            original_path: None,
            status: None,
        }
    }

    /// Run title and description through `translator` before stripping
    /// markup.
    #[must_use]
    pub fn with_translator(mut self, translator: &'a dyn Translate) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Record the path the caller originally asked about, when `path`
    /// has already been rewritten upstream (e.g. a locale prefix was
    /// stripped).
    #[must_use]
    pub fn with_original_path(mut self, original_path: &'a str) -> Self {
        self.original_path = Some(original_path);
        self
    }

    /// Attach the HTTP status of the response being built. A non-200
    /// status suppresses the top-level miss and falls through to the
    /// root entry instead.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Resolved page metadata: sanitized plain text, ready for templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedMeta {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
}

/// Resolution failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No configured entry exists for the path or any of its ancestors.
    ///
    /// An expected, recoverable condition: callers typically log it and
    /// fall back to resolving `"/"`.
    #[error("path \"{path}\" needs a meta config key defined")]
    NotFound {
        /// Top-level path segment where the upward search terminated.
        path: String,
        /// Path the caller originally asked about.
        original_path: String,
    },
}

/// Path-to-metadata resolver over an immutable [`MetaStore`].
///
/// Stateless apart from the store, so a single instance serves any
/// number of concurrent requests.
#[derive(Clone, Debug)]
pub struct Resolver {
    store: MetaStore,
}

impl Resolver {
    /// Create a resolver over `store`.
    #[must_use]
    pub fn new(store: MetaStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MetaStore {
        &self.store
    }

    /// Resolve metadata for a request.
    ///
    /// Tries the exact path first, then each ancestor obtained by
    /// truncating at the last `/` (`/blog/123` → `/blog` → `/`). The
    /// first configured entry wins; its fields are translated (when a
    /// translator is present) and stripped of markup. The loop
    /// terminates because every truncation strictly shortens the path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when the search reaches an
    /// unconfigured top-level segment and no non-200 status suppresses
    /// the failure. A miss at `"/"` itself always fails, whatever the
    /// status.
    pub fn resolve(&self, request: &ResolveRequest<'_>) -> Result<ResolvedMeta, ResolveError> {
        let original = request.original_path.unwrap_or(request.path);
        let mut current = request.path;

        loop {
            if let Some(entry) = self.store.get(current) {
                return Ok(ResolvedMeta {
                    title: prepare(&entry.title, request.translator),
                    description: prepare(&entry.description, request.translator),
                });
            }

            // Parent is the prefix before the last slash; a path without
            // one (or with nothing before it) is already top-level.
            let parent = current.rfind('/').map_or("", |idx| &current[..idx]);
            let at_top_level = current == "/" || parent.is_empty();

            // Suppression redirects a top-level miss to "/"; once "/"
            // itself has missed there is nowhere left to fall, so the
            // search always terminates.
            if at_top_level && (current == "/" || !error_response(request.status)) {
                return Err(ResolveError::NotFound {
                    path: current.to_owned(),
                    original_path: original.to_owned(),
                });
            }

            current = if parent.is_empty() { "/" } else { parent };
        }
    }
}

/// Whether a status hint marks the response as already failed, which
/// suppresses the top-level miss.
fn error_response(status: Option<u16>) -> bool {
    status.is_some_and(|code| code != 200)
}

/// Translate (pipes escaped first) and strip markup from one field.
fn prepare(value: &str, translator: Option<&dyn Translate>) -> String {
    let translated = match translator {
        Some(t) => t.translate(&value.replace('|', PIPE_ENTITY)),
        None => value.to_owned(),
    };
    strip_markup(&translated)
}
