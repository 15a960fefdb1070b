//! Application state.
//!
//! Shared, immutable state for all request handlers.

use std::sync::Arc;

use wiki_storage::PageStore;

use crate::render::Templates;
use crate::routing::PathValidator;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page storage backend.
    pub(crate) store: Arc<dyn PageStore>,
    /// Compiled page templates.
    pub(crate) templates: Templates,
    /// Page path validator.
    pub(crate) validator: PathValidator,
}
