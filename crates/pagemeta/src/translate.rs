//! Translation capability.

/// A text-to-text translation hook, typically backed by an i18n catalog.
///
/// Implementations receive the raw configured string (with pipe characters
/// already entity-escaped, see [`crate::Resolver`]) and return the
/// localized form. The identity function is a valid implementation.
pub trait Translate {
    /// Translate a single string.
    fn translate(&self, text: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, text: &str) -> String {
        self(text)
    }
}
