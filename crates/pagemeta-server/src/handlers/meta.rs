//! Metadata API endpoint.
//!
//! Returns the resolved `{title, description}` for a path as JSON,
//! with the same recovery policy the page middleware uses.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use pagemeta::ResolvedMeta;
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/meta/{path}.
#[derive(Serialize)]
pub(crate) struct MetaResponse {
    /// Resolved page title.
    title: String,
    /// Resolved page description.
    description: String,
}

impl From<ResolvedMeta> for MetaResponse {
    fn from(meta: ResolvedMeta) -> Self {
        Self {
            title: meta.title,
            description: meta.description,
        }
    }
}

/// Handle GET /api/meta/ (root path).
pub(crate) async fn get_root_meta(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetaResponse>, ServerError> {
    lookup(&state, "")
}

/// Handle GET /api/meta/{path}.
pub(crate) async fn get_meta(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetaResponse>, ServerError> {
    lookup(&state, &path)
}

/// Shared implementation for both routes.
fn lookup(state: &AppState, path: &str) -> Result<Json<MetaResponse>, ServerError> {
    let meta = state.lookup(&to_url_path(path), None, None)?;
    Ok(Json(meta.into()))
}
