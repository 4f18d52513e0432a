//! Application state.
//!
//! Shared state for all request handlers.

use pagemeta::{ResolveError, ResolveRequest, ResolvedMeta, Resolver, Translate};
use pagemeta_config::MissingLevel;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Metadata resolver over the validated store.
    pub(crate) resolver: Resolver,
    /// Severity for logging recoverable metadata misses.
    pub(crate) missing_level: MissingLevel,
}

impl AppState {
    /// Resolve metadata with the recovery policy applied.
    ///
    /// A miss is logged at the configured severity and retried against
    /// `"/"` with the same translator. The retry only fails if the root
    /// entry itself is unusable, which indicates broken configuration
    /// and is left to the caller to surface.
    pub(crate) fn lookup(
        &self,
        path: &str,
        translator: Option<&dyn Translate>,
        status: Option<u16>,
    ) -> Result<ResolvedMeta, ResolveError> {
        let mut request = ResolveRequest::new(path);
        if let Some(translator) = translator {
            request = request.with_translator(translator);
        }
        if let Some(status) = status {
            request = request.with_status(status);
        }

        match self.resolver.resolve(&request) {
            Ok(meta) => Ok(meta),
            Err(err) => {
                self.log_missing(&err);
                let mut fallback = ResolveRequest::new("/");
                if let Some(translator) = translator {
                    fallback = fallback.with_translator(translator);
                }
                self.resolver.resolve(&fallback)
            }
        }
    }

    /// Log a recoverable miss at the configured severity.
    fn log_missing(&self, err: &ResolveError) {
        match self.missing_level {
            MissingLevel::Error => tracing::error!(error = %err, "Page metadata missing"),
            MissingLevel::Warn => tracing::warn!(error = %err, "Page metadata missing"),
            MissingLevel::Debug => tracing::debug!(error = %err, "Page metadata missing"),
        }
    }
}
