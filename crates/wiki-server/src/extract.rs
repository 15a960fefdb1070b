//! Page path extractor.
//!
//! Every page handler takes a [`PagePath`] argument. axum runs this extractor
//! before the handler body and before the request body is read, so an invalid
//! path is answered with 404 without any page store access.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ServerError;
use crate::routing::PagePath;
use crate::state::AppState;

impl FromRequestParts<Arc<AppState>> for PagePath {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        let page = state
            .validator
            .parse(path)
            .ok_or_else(|| ServerError::InvalidPath(path.to_owned()))?;

        tracing::debug!(action = %page.action, title = %page.title, "Page request");
        Ok(page)
    }
}
