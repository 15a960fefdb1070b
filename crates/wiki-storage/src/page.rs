//! Page entity and its validated title.

use std::fmt;

/// Error returned when a string is not a valid page title.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    /// Title is empty.
    #[error("page title cannot be empty")]
    Empty,
    /// Title contains a character outside `[A-Za-z0-9]`.
    #[error("page title contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Page identifier.
///
/// A non-empty string of ASCII letters and digits. The title doubles as the
/// storage key, so it never contains separators, dots, or other characters
/// that a backend could interpret as a path component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

impl Title {
    /// Validate and wrap a page title.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError`] if `value` is empty or contains anything other
    /// than ASCII alphanumerics.
    pub fn new(value: impl Into<String>) -> Result<Self, TitleError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TitleError::Empty);
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(TitleError::InvalidChar(c));
        }
        Ok(Self(value))
    }

    /// Borrow the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page.
///
/// A `Page` may exist only in memory: [`Page::empty`] builds the blank page
/// shown in the edit form before anything has been saved under its title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Page title, also the storage key.
    pub title: Title,
    /// Raw page content.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page with the given body.
    #[must_use]
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// Create an unsaved page with an empty body.
    #[must_use]
    pub fn empty(title: Title) -> Self {
        Self {
            title,
            body: Vec::new(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
