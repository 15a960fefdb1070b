//! Configuration for the wiki.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults (`127.0.0.1:8080`, pages in the current directory,
//!    `.txt` files, built-in templates)
//! 2. a `wiki.toml` file, given explicitly or found by walking up from the
//!    current directory
//! 3. command-line overrides ([`CliSettings`])
//!
//! ```toml
//! [server]
//! host = "${WIKI_HOST:-127.0.0.1}"
//! port = 8080
//!
//! [pages]
//! dir = "pages"        # relative to the directory holding wiki.toml
//! extension = "txt"
//!
//! [templates]
//! dir = "templates"    # omit to use the built-in templates
//! ```
//!
//! `server.host`, `pages.dir` and `templates.dir` support `${VAR}` and
//! `${VAR:-default}` expansion.

mod expand;
mod file;

use std::path::{Path, PathBuf};

use file::ConfigFile;

/// Name of the config file looked up during discovery.
pub const CONFIG_FILENAME: &str = "wiki.toml";

/// Command-line overrides. `None` keeps the loaded value.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub pages_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
}

impl CliSettings {
    fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.pages_dir {
            config.pages.dir.clone_from(dir);
        }
        if let Some(dir) = &self.templates_dir {
            config.templates.dir = Some(dir.clone());
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub pages: PagesConfig,
    pub templates: TemplatesConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
}

/// Listener address.
#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Page storage location.
#[derive(Debug)]
pub struct PagesConfig {
    /// Directory holding one file per page.
    pub dir: PathBuf,
    /// Page file extension, without the dot.
    pub extension: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extension: "txt".to_owned(),
        }
    }
}

/// Template location.
#[derive(Debug, Default)]
pub struct TemplatesConfig {
    /// Directory with `view.html` and `edit.html`; `None` means built-in.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// `${VAR}` reference to an unset variable.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar { field: String, message: String },
}

impl Config {
    /// Load configuration.
    ///
    /// With `config_path`, that file must exist. Without it, the nearest
    /// `wiki.toml` in the current directory or its parents is used, falling
    /// back to defaults rooted at the current directory. `cli_settings` are
    /// applied last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed,
    /// references an unset variable, or the final values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;

        let path = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => find_config(&cwd),
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self {
                pages: PagesConfig {
                    dir: cwd,
                    ..PagesConfig::default()
                },
                ..Self::default()
            },
        };

        if let Some(settings) = cli_settings {
            settings.apply_to(&mut config);
        }
        config.validate()?;

        Ok(config)
    }

    /// Read `path`, resolving relative paths against its directory.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        // A bare "wiki.toml" has an empty parent
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut config = ConfigFile::read(path)?.resolve(base)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Check values that would make the server fail or misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return invalid("server.host cannot be empty");
        }
        // Port 0 binds a random port, which is never what a wiki config means
        if self.server.port == 0 {
            return invalid("server.port cannot be 0");
        }

        let extension = &self.pages.extension;
        if extension.is_empty() {
            return invalid("pages.extension cannot be empty");
        }
        // Page files are "<title>.<extension>"; separators or dots here would
        // let a key escape the page directory or collide with another title
        if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return invalid(format!(
                "pages.extension must be ASCII alphanumeric, got {extension:?}"
            ));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Result<(), ConfigError> {
    Err(ConfigError::Validation(msg.into()))
}

/// Nearest `wiki.toml` in `start` or one of its ancestors.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
