//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::meta::resolve_meta;
use crate::state::AppState;

/// Create the application router.
///
/// Document routes run behind the metadata middleware; the API routes
/// resolve explicitly and skip it.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/meta/", get(handlers::meta::get_root_meta))
        .route("/api/meta/{*path}", get(handlers::meta::get_meta));

    let page_routes = Router::new()
        .route("/", get(handlers::pages::render))
        .route("/{*path}", get(handlers::pages::render))
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            resolve_meta,
        ));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pagemeta::{MetaStore, Resolver};
    use pagemeta_config::MissingLevel;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::meta::{PathWithoutLocale, RequestTranslator, ResponseStatus};

    fn app(pairs: &[(&str, serde_json::Value)]) -> Router {
        let raw: BTreeMap<String, serde_json::Value> = pairs
            .iter()
            .map(|(path, value)| ((*path).to_owned(), value.clone()))
            .collect();
        let state = Arc::new(AppState {
            resolver: Resolver::new(MetaStore::from_raw(raw).unwrap()),
            missing_level: MissingLevel::Debug,
        });
        create_router(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_gets_resolved_title() {
        let app = app(&[
            ("/", json!(["Home", "H"])),
            ("/blog", json!(["Blog", "Articles"])),
        ]);

        let response = app
            .oneshot(Request::get("/blog/123").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<title>Blog</title>"));
        assert!(body.contains("content=\"Articles\""));
    }

    #[tokio::test]
    async fn test_miss_falls_back_to_root_entry() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let response = app
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<title>Home</title>"));
    }

    #[tokio::test]
    async fn test_error_status_extension_reaches_resolver() {
        let app = app(&[
            ("/", json!(["Home", "H"])),
            ("/error", json!(["Error", "E"])),
        ]);

        // An upstream error handler marks the response as failed; the
        // miss on /missing is then suppressed rather than logged before
        // the root fallback.
        let mut request = Request::get("/missing").body(Body::empty()).unwrap();
        request.extensions_mut().insert(ResponseStatus(404));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<title>Home</title>"));
    }

    #[tokio::test]
    async fn test_xhr_request_skips_resolution() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let response = app
            .oneshot(
                Request::get("/")
                    .header("x-requested-with", "XMLHttpRequest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(!body.contains("<title>"));
    }

    #[tokio::test]
    async fn test_post_request_skips_resolution() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let response = app
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // POST to the page route is method-not-allowed, but the point is
        // the middleware let it through untouched.
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_markup_in_config_stripped() {
        let app = app(&[("/", json!(["<strong>Home</strong>", "desc"]))]);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_string(response).await;
        assert!(body.contains("<title>Home</title>"));
    }

    #[tokio::test]
    async fn test_locale_stripped_path_extension_wins() {
        let app = app(&[
            ("/", json!(["Home", "H"])),
            ("/blog", json!(["Blog", "B"])),
        ]);

        let mut request = Request::get("/en/blog/123").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(PathWithoutLocale("/blog/123".to_owned()));

        let response = app.oneshot(request).await.unwrap();

        let body = body_string(response).await;
        assert!(body.contains("<title>Blog</title>"));
    }

    #[tokio::test]
    async fn test_request_translator_applied() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let mut request = Request::get("/").body(Body::empty()).unwrap();
        request.extensions_mut().insert(RequestTranslator(Arc::new(
            |text: &str| text.to_uppercase(),
        )));

        let response = app.oneshot(request).await.unwrap();

        let body = body_string(response).await;
        assert!(body.contains("<title>HOME</title>"));
    }

    #[tokio::test]
    async fn test_preset_meta_left_alone() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let mut request = Request::get("/").body(Body::empty()).unwrap();
        request.extensions_mut().insert(pagemeta::ResolvedMeta {
            title: "Error".to_owned(),
            description: "Something went wrong".to_owned(),
        });

        let response = app.oneshot(request).await.unwrap();

        let body = body_string(response).await;
        assert!(body.contains("<title>Error</title>"));
    }

    #[tokio::test]
    async fn test_api_meta_endpoint() {
        let app = app(&[
            ("/", json!(["Home", "H"])),
            ("/blog", json!(["Blog", "B"])),
        ]);

        let response = app
            .oneshot(Request::get("/api/meta/blog/123").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!({ "title": "Blog", "description": "B" }));
    }

    #[tokio::test]
    async fn test_api_meta_root() {
        let app = app(&[("/", json!(["Home", "H"]))]);

        let response = app
            .oneshot(Request::get("/api/meta/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["title"], "Home");
    }
}
