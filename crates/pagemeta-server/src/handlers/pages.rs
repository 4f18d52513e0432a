//! Document page handler.
//!
//! Renders a minimal HTML shell whose `<head>` consumes the metadata
//! the middleware placed in request extensions. Stands in for whatever
//! template engine an embedding application uses.

use axum::Extension;
use axum::response::Html;
use pagemeta::ResolvedMeta;

/// Handle GET for document routes.
pub(crate) async fn render(meta: Option<Extension<ResolvedMeta>>) -> Html<String> {
    Html(render_shell(meta.map(|Extension(meta)| meta).as_ref()))
}

/// Build the HTML shell around the resolved metadata.
fn render_shell(meta: Option<&ResolvedMeta>) -> String {
    let head = meta.map_or_else(String::new, |meta| {
        format!(
            "<title>{}</title><meta name=\"description\" content=\"{}\">",
            escape_html(&meta.title),
            escape_html(&meta.description),
        )
    });
    format!("<!DOCTYPE html><html><head>{head}</head><body></body></html>")
}

/// Escape text for embedding in HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
