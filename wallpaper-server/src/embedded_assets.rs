//! Browser UI embedded into the server binary at compile time.

use std::borrow::Cow;

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

const INDEX: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "ui/"]
pub struct UiAssets;

/// How a request path maps onto the embedded UI.
#[derive(Debug, PartialEq, Eq)]
enum UiRoute<'a> {
    /// A file that exists in the bundle.
    Asset(&'a str),
    /// An extension-less path; the page itself handles it.
    Page,
    /// A file that does not exist.
    Missing,
}

fn route(path: &str) -> UiRoute<'_> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return UiRoute::Page;
    }
    if UiAssets::get(path).is_some() {
        return UiRoute::Asset(path);
    }
    let file_name = path.rsplit('/').next().unwrap_or_default();
    if file_name.contains('.') {
        UiRoute::Missing
    } else {
        UiRoute::Page
    }
}

fn asset_response(path: &str, data: Cow<'static, [u8]>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.to_string())], data.into_owned()).into_response()
}

/// Fallback handler: UI files by name, the page for anything else without
/// an extension.
pub async fn serve_ui(uri: Uri) -> Response {
    let path = match route(uri.path()) {
        UiRoute::Asset(path) => path,
        UiRoute::Page => INDEX,
        UiRoute::Missing => {
            tracing::debug!("No embedded asset for {}", uri.path());
            return (StatusCode::NOT_FOUND, "Asset not found").into_response();
        }
    };
    match UiAssets::get(path) {
        Some(file) => asset_response(path, file.data),
        None => (StatusCode::NOT_FOUND, "UI not embedded").into_response(),
    }
}
