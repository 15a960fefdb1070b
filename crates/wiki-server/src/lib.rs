//! HTTP server for the wiki.
//!
//! This crate provides a native Rust HTTP server using axum, serving three
//! page actions:
//! - `GET|POST /view/{title}` renders a page, redirecting to the edit form
//!   when the page doesn't exist yet
//! - `GET /edit/{title}` renders the edit form
//! - `POST /save/{title}` stores the submitted `body` form field
//!
//! Every other path, and every title that isn't ASCII alphanumeric, is a 404.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         pages_dir: PathBuf::from("pages"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (wiki-server)
//!                        │
//!                        ├─► PagePath extractor ──► PathValidator (404 on mismatch)
//!                        │
//!                        ├─► page handlers ──► PageStore (wiki-storage-fs)
//!                        │
//!                        └─► Templates (minijinja) ──► HTML
//! ```

mod app;
mod error;
mod extract;
mod handlers;
mod middleware;
mod render;
mod routing;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use render::Templates;
use routing::PathValidator;
use state::AppState;
use wiki_storage_fs::FsPageStore;

pub use error::ServerError;
pub use render::RenderError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding one file per page.
    pub pages_dir: PathBuf,
    /// Page file extension, without the dot.
    pub extension: String,
    /// Directory with `view.html` and `edit.html` (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            pages_dir: PathBuf::from("."),
            extension: wiki_storage_fs::DEFAULT_EXTENSION.to_owned(),
            templates_dir: None,
        }
    }
}

/// Run the server.
///
/// Builds the page store, templates and path validator before binding the
/// listener; any failure there aborts startup.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(build_state(&config)?);

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, pages_dir = %config.pages_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build application state from configuration.
fn build_state(config: &ServerConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let store = FsPageStore::with_extension(config.pages_dir.clone(), config.extension.clone());
    store.create_root()?;

    let templates = match &config.templates_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading templates");
            Templates::from_dir(dir)?
        }
        None => Templates::builtin()?,
    };

    Ok(AppState {
        store: Arc::new(store),
        templates,
        validator: PathValidator::new()?,
    })
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wiki config.
///
/// # Arguments
///
/// * `config` - Loaded and validated wiki configuration
#[must_use]
pub fn server_config_from_config(config: &wiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_dir: config.pages.dir.clone(),
        extension: config.pages.extension.clone(),
        templates_dir: config.templates.dir.clone(),
    }
}
