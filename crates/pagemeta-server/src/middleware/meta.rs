//! Metadata resolution middleware.
//!
//! Resolves `{title, description}` for document requests and stores it
//! in request extensions so page handlers and templates can read it
//! without looking it up themselves.
//!
//! Skipped for non-GET requests, XHR requests, and requests that
//! already carry resolved metadata (e.g. an error handler upstream set
//! its own).

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pagemeta::{ResolvedMeta, Translate};

use crate::error::ServerError;
use crate::state::AppState;

/// Request extension: the path with any locale prefix stripped.
///
/// Inserted by upstream i18n middleware; when present it is used for
/// resolution instead of the raw request path.
#[derive(Clone, Debug)]
pub struct PathWithoutLocale(pub String);

/// Request extension: the translator for the request's locale.
#[derive(Clone)]
pub struct RequestTranslator(pub Arc<dyn Translate + Send + Sync>);

/// Request extension: the HTTP status the response is being built with.
///
/// Inserted by upstream error-handling middleware. A non-200 value lets
/// a miss on the request path fall through to the root entry instead of
/// being reported.
#[derive(Clone, Copy, Debug)]
pub struct ResponseStatus(pub u16);

/// Resolve metadata into request extensions, then continue.
pub(crate) async fn resolve_meta(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET
        || is_xhr(request.headers())
        || request.extensions().get::<ResolvedMeta>().is_some()
    {
        return next.run(request).await;
    }

    let path = request
        .extensions()
        .get::<PathWithoutLocale>()
        .map_or_else(|| request.uri().path().to_owned(), |p| p.0.clone());
    let translator = request
        .extensions()
        .get::<RequestTranslator>()
        .map(|t| Arc::clone(&t.0));

    let status = request
        .extensions()
        .get::<ResponseStatus>()
        .map(|status| status.0);

    let translator_ref = translator.as_deref().map(|t| t as &dyn Translate);
    match state.lookup(&path, translator_ref, status) {
        Ok(meta) => {
            request.extensions_mut().insert(meta);
        }
        Err(err) => return ServerError::from(err).into_response(),
    }

    next.run(request).await
}

/// Whether the request came from `XMLHttpRequest`.
fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .is_some_and(|value| value.as_bytes() == b"XMLHttpRequest")
}
