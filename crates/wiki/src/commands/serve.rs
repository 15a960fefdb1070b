//! `wiki serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use wiki_config::{CliSettings, Config};
use wiki_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page directory (overrides config).
    #[arg(long, env = "WIKI_PAGES_DIR")]
    pages_dir: Option<PathBuf>,

    /// Directory with view.html and edit.html (overrides config).
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        output.listening(&config.server.host, config.server.port);
        output.detail("Pages", config.pages.dir.display());
        match &config.templates.dir {
            Some(dir) => output.detail("Templates", dir.display()),
            None => output.detail("Templates", "built-in"),
        }
        if let Some(path) = &config.config_path {
            output.detail("Config", path.display());
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Overrides taken from command-line flags.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            pages_dir: self.pages_dir.clone(),
            templates_dir: self.templates_dir.clone(),
        }
    }
}
