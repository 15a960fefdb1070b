//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, pages};
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/view/{title}",
            get(pages::view_page)
                .post(pages::view_page)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/edit/{title}",
            get(pages::edit_page).fallback(handlers::method_not_allowed),
        )
        .route(
            "/save/{title}",
            post(pages::save_page).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp())
                .layer(security::nosniff())
                .layer(security::deny_framing())
                .layer(security::same_origin_referrer()),
        )
        .with_state(state)
}
