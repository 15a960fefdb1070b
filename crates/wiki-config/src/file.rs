//! On-disk `wiki.toml` schema.
//!
//! Every field is optional; [`ConfigFile::resolve`] fills in defaults,
//! expands environment variables and anchors relative paths.

use std::path::Path;

use serde::Deserialize;

use crate::expand::expand_env;
use crate::{Config, ConfigError, PagesConfig, ServerConfig, TemplatesConfig};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    server: ServerSection,
    pages: PagesSection,
    templates: TemplatesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PagesSection {
    dir: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TemplatesSection {
    dir: Option<String>,
}

impl ConfigFile {
    /// Read and parse a config file.
    pub(crate) fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Turn the parsed file into a [`Config`], with relative paths joined
    /// onto `base`.
    pub(crate) fn resolve(self, base: &Path) -> Result<Config, ConfigError> {
        let defaults = ServerConfig::default();
        let host = match self.server.host {
            Some(host) => expand_env(&host, "server.host")?,
            None => defaults.host,
        };

        let pages_dir = match self.pages.dir {
            Some(dir) => base.join(expand_env(&dir, "pages.dir")?),
            None => base.to_path_buf(),
        };
        let templates_dir = self
            .templates
            .dir
            .map(|dir| expand_env(&dir, "templates.dir").map(|d| base.join(d)))
            .transpose()?;

        Ok(Config {
            server: ServerConfig {
                host,
                port: self.server.port.unwrap_or(defaults.port),
            },
            pages: PagesConfig {
                dir: pages_dir,
                extension: self
                    .pages
                    .extension
                    .unwrap_or_else(|| PagesConfig::default().extension),
            },
            templates: TemplatesConfig { dir: templates_dir },
            config_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(toml: &str) -> Config {
        toml::from_str::<ConfigFile>(toml)
            .unwrap()
            .resolve(Path::new("/project"))
            .unwrap()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = resolve("");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pages.dir, PathBuf::from("/project"));
        assert_eq!(config.pages.extension, "txt");
        assert!(config.templates.dir.is_none());
    }

    #[test]
    fn test_all_sections() {
        let config = resolve(
            r#"
[server]
host = "0.0.0.0"
port = 9000

[pages]
dir = "data"
extension = "md"

[templates]
dir = "theme"
"#,
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.pages.dir, PathBuf::from("/project/data"));
        assert_eq!(config.pages.extension, "md");
        assert_eq!(config.templates.dir, Some(PathBuf::from("/project/theme")));
    }

    #[test]
    fn test_absolute_dir_is_kept() {
        let config = resolve("[pages]\ndir = \"/var/lib/wiki\"\n");

        assert_eq!(config.pages.dir, PathBuf::from("/var/lib/wiki"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = toml::from_str::<ConfigFile>("[pages]\ndirectory = \"data\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_in_pages_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WIKI_FILE_TEST_PAGES", "/srv/pages");
        }

        let config = resolve("[pages]\ndir = \"${WIKI_FILE_TEST_PAGES}\"\n");

        assert_eq!(config.pages.dir, PathBuf::from("/srv/pages"));

        unsafe {
            std::env::remove_var("WIKI_FILE_TEST_PAGES");
        }
    }

    #[test]
    fn test_missing_env_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WIKI_FILE_TEST_MISSING");
        }

        let err = toml::from_str::<ConfigFile>("[templates]\ndir = \"${WIKI_FILE_TEST_MISSING}\"\n")
            .unwrap()
            .resolve(Path::new("/project"))
            .unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "templates.dir"));
    }
}
