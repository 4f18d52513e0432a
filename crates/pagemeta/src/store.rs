//! Validated metadata store.
//!
//! Holds the `path -> (title, description)` mapping. All shape checking
//! happens at construction: raw JSON-like values come in, typed
//! [`MetaEntry`] values come out, and lookups never re-validate.

use std::collections::BTreeMap;

use serde_json::Value;

/// Path that always has an entry, defaulting to empty strings.
const ROOT_PATH: &str = "/";

/// A page title and description, both plain text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaEntry {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
}

/// Immutable map from URL path to [`MetaEntry`].
///
/// Always contains an entry for `"/"` (empty title and description unless
/// the caller provides one): [`MetaStore::from_raw`] is the only
/// constructor and it merges the root entry in. Built once and read-only
/// afterwards, so it is safe to share across request handlers without
/// locking.
#[derive(Clone, Debug)]
pub struct MetaStore {
    entries: BTreeMap<String, MetaEntry>,
}

/// Error raised while validating raw store entries.
///
/// Any of these indicates malformed static configuration and is fatal to
/// startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Entry value was not an array.
    #[error("path \"{0}\" was not an array")]
    NotAnArray(String),
    /// Entry array had fewer than two elements.
    #[error("path \"{0}\" must have exactly two keys")]
    WrongLength(String),
    /// First element was not a string.
    #[error("path \"{0}\" needs String for title")]
    TitleNotString(String),
    /// Second element was not a string.
    #[error("path \"{0}\" needs String for description")]
    DescriptionNotString(String),
}

impl MetaStore {
    /// Build a store from raw configuration values.
    ///
    /// Entries are validated one path at a time in sorted order, stopping
    /// at the first invalid one. Each value must be an array whose first
    /// two elements are strings; trailing elements beyond the first two
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] describing the first invalid entry.
    pub fn from_raw(
        raw: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Self, StoreError> {
        let mut merged: BTreeMap<String, Value> = BTreeMap::new();
        merged.insert(ROOT_PATH.to_owned(), Value::Array(vec![Value::String(String::new()); 2]));
        merged.extend(raw);

        let mut entries = BTreeMap::new();
        for (path, value) in merged {
            let entry = validate_entry(&path, &value)?;
            entries.insert(path, entry);
        }

        Ok(Self { entries })
    }

    /// Exact-match lookup, case-sensitive, no path normalization.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&MetaEntry> {
        self.entries.get(path)
    }

    /// Number of configured paths (including the implicit root entry).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries. Always `false`, since
    /// construction merges the root entry in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a store from already-typed entries, bypassing the root
    /// merge. Lets tests exercise behavior on a store that violates the
    /// root invariant.
    #[cfg(test)]
    pub(crate) fn from_entries(entries: BTreeMap<String, MetaEntry>) -> Self {
        Self { entries }
    }
}

/// Check a single raw value and convert it to a typed entry.
fn validate_entry(path: &str, value: &Value) -> Result<MetaEntry, StoreError> {
    let Value::Array(items) = value else {
        return Err(StoreError::NotAnArray(path.to_owned()));
    };

    // Only the first two elements count (0 = title, 1 = description);
    // extras are silently dropped.
    let items = &items[..items.len().min(2)];
    if items.len() != 2 {
        return Err(StoreError::WrongLength(path.to_owned()));
    }

    let Value::String(title) = &items[0] else {
        return Err(StoreError::TitleNotString(path.to_owned()));
    };
    let Value::String(description) = &items[1] else {
        return Err(StoreError::DescriptionNotString(path.to_owned()));
    };

    Ok(MetaEntry {
        title: title.clone(),
        description: description.clone(),
    })
}
