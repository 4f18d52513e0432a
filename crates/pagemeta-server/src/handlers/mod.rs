//! HTTP request handlers.

pub(crate) mod meta;
pub(crate) mod pages;

/// Convert a wildcard route capture (without leading slash) to the URL
/// path form the resolver expects.
pub(crate) fn to_url_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{path}")
    }
}
