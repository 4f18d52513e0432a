//! Server error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pagemeta::ResolveError;
use serde_json::json;

/// Server error type.
///
/// Reaching this means the recovery policy already failed; by the store
/// invariant that only happens with a broken configuration, so the
/// response is a 500.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error("metadata resolution failed: {0}")]
    Meta(#[from] ResolveError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
