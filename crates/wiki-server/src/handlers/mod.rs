//! HTTP request handlers.

pub(crate) mod pages;

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::routing::PagePath;

/// Fallback for paths that match no route.
pub(crate) async fn not_found(uri: Uri) -> ServerError {
    ServerError::InvalidPath(uri.path().to_owned())
}

/// Fallback for a page route hit with the wrong method.
///
/// Takes a [`PagePath`] so an invalid title still answers 404.
pub(crate) async fn method_not_allowed(page: PagePath) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, page.action.allowed_methods())],
    )
        .into_response()
}
