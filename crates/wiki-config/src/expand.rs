//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("127.0.0.1", "server.host").unwrap(), "127.0.0.1");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WIKI_EXPAND_UNSET");
        }

        let value = expand_env("${WIKI_EXPAND_UNSET:-pages}", "pages.dir").unwrap();

        assert_eq!(value, "pages");
    }

    #[test]
    fn test_set_variable_expands() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WIKI_EXPAND_SET", "/srv/wiki");
        }

        let value = expand_env("${WIKI_EXPAND_SET}/pages", "pages.dir").unwrap();

        assert_eq!(value, "/srv/wiki/pages");

        unsafe {
            std::env::remove_var("WIKI_EXPAND_SET");
        }
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WIKI_EXPAND_MISSING");
        }

        let err = expand_env("${WIKI_EXPAND_MISSING}", "server.host").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("WIKI_EXPAND_MISSING"));
        assert!(err.to_string().contains("server.host"));
    }
}
