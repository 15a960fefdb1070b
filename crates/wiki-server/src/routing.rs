//! Page path validation.
//!
//! Every page URL has the shape `/<action>/<title>`. [`PathValidator`] is the
//! only place that turns a raw request path into a [`Title`]; nothing reaches
//! the page store without passing through it.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use wiki_storage::Title;

/// Anchored pattern for page paths. Titles are one or more ASCII alphanumerics.
const PAGE_PATH_PATTERN: &str = r"^/(edit|save|view)/([a-zA-Z0-9]+)$";

/// Page action selected by the first path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    /// Value of the `Allow` header for this action's route.
    pub(crate) fn allowed_methods(self) -> &'static str {
        match self {
            Self::View => "GET, HEAD, POST",
            Self::Edit => "GET, HEAD",
            Self::Save => "POST",
        }
    }

    /// URL path of this action for a page, e.g. `/edit/Alpha`.
    pub(crate) fn path_for(self, title: &Title) -> String {
        format!("/{}/{title}", self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "save" => Ok(Self::Save),
            _ => Err(()),
        }
    }
}

/// A request path that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PagePath {
    pub(crate) action: Action,
    pub(crate) title: Title,
}

/// Validates request paths against the page path pattern.
///
/// Built once at startup and shared through application state.
#[derive(Debug)]
pub(crate) struct PathValidator {
    pattern: Regex,
}

impl PathValidator {
    /// Compile the page path pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(PAGE_PATH_PATTERN)?,
        })
    }

    /// Parse a raw (still percent-encoded) request path.
    ///
    /// Returns `None` unless the whole path matches `/<action>/<title>`.
    pub(crate) fn parse(&self, path: &str) -> Option<PagePath> {
        let captures = self.pattern.captures(path)?;
        let action = captures.get(1)?.as_str().parse().ok()?;
        let title = Title::new(captures.get(2)?.as_str()).ok()?;
        Some(PagePath { action, title })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn validator() -> PathValidator {
        PathValidator::new().unwrap()
    }

    #[test]
    fn test_parse_each_action() {
        let v = validator();

        for (path, action) in [
            ("/view/Alpha", Action::View),
            ("/edit/Alpha", Action::Edit),
            ("/save/Alpha", Action::Save),
        ] {
            let parsed = v.parse(path).unwrap();
            assert_eq!(parsed.action, action);
            assert_eq!(parsed.title.as_str(), "Alpha");
        }
    }

    #[test]
    fn test_parse_digits_and_mixed_case() {
        let parsed = validator().parse("/view/Page42x").unwrap();

        assert_eq!(parsed.title.as_str(), "Page42x");
    }

    #[test]
    fn test_rejects_traversal() {
        let v = validator();

        assert!(v.parse("/edit/../../etc/passwd").is_none());
        assert!(v.parse("/view/..").is_none());
        assert!(v.parse("/view/a/../b").is_none());
    }

    #[test]
    fn test_rejects_dots_slashes_and_encoded_separators() {
        let v = validator();

        for path in [
            "/view/a.b",
            "/view/a/b",
            "/view/a%2Fb",
            "/view/%2E%2E",
            "/view/a b",
            "/view/a-b",
            "/view/Alpha/",
        ] {
            assert!(v.parse(path).is_none(), "expected {path:?} to be rejected");
        }
    }

    #[test]
    fn test_rejects_unknown_action_and_bad_shape() {
        let v = validator();

        for path in [
            "/",
            "/view",
            "/view/",
            "/delete/Alpha",
            "/View/Alpha",
            "view/Alpha",
            "//view/Alpha",
            "/view/Alpha?x=1",
        ] {
            assert!(v.parse(path).is_none(), "expected {path:?} to be rejected");
        }
    }

    #[test]
    fn test_action_path_for() {
        let title = Title::new("Beta").unwrap();

        assert_eq!(Action::Edit.path_for(&title), "/edit/Beta");
        assert_eq!(Action::View.path_for(&title), "/view/Beta");
    }

    #[test]
    fn test_allowed_methods() {
        assert_eq!(Action::View.allowed_methods(), "GET, HEAD, POST");
        assert_eq!(Action::Edit.allowed_methods(), "GET, HEAD");
        assert_eq!(Action::Save.allowed_methods(), "POST");
    }

    #[test]
    fn test_action_round_trips_through_str() {
        for action in [Action::View, Action::Edit, Action::Save] {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("remove".parse::<Action>().is_err());
    }
}
