//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wiki_storage::StorageError;

use crate::render::RenderError;

/// Body of every 404 response.
const NOT_FOUND_BODY: &str = "404 page not found";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request path is not a valid page path.
    #[error("Invalid page path: {0}")]
    InvalidPath(String),

    /// Page store failure.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template rendering failure.
    #[error("{0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidPath(path) => {
                tracing::debug!(path = %path, "Rejected page path");
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
            }
            Self::Storage(_) | Self::Render(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
