//! Page store trait and its error type.
//!
//! Every [`PageStore`] method takes a [`Title`], never a raw string. Backends
//! derive their own key from it (the filesystem backend uses `<title>.txt`)
//! and may rely on the title alphabet being ASCII alphanumerics only.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::page::{Page, Title};

/// What went wrong, independent of the backend.
///
/// Handlers only branch on [`StorageErrorKind::NotFound`]; the other kinds
/// exist so failures read well in logs and 500 bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No page is stored under the title.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// The backend could not map the key to a location.
    InvalidPath,
    /// Anything else.
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                Self::PermissionDenied
            }
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename => Self::InvalidPath,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::Other => "Error",
        })
    }
}

/// Failure of a [`PageStore`] operation.
///
/// Displays as `[Backend] Kind: source (path: p)`, omitting absent parts.
#[derive(Debug)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    /// Backend location the operation touched, if any.
    pub path: Option<PathBuf>,
    /// Backend tag, `"Fs"` or `"Mock"`.
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// No page at `path`.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Classify an I/O error raised while touching `path`.
    #[must_use]
    pub fn io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::from_io(err.kind()))
            .with_path(path)
            .with_source(err)
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the page simply does not exist yet.
    ///
    /// This is the one outcome callers treat as normal control flow.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Key-value persistence of page bodies, keyed by title.
///
/// Implementations hold no per-request state: every call goes to the backing
/// store, so a loaded [`Page`] reflects whatever was last written.
pub trait PageStore: Send + Sync {
    /// Load a page by title.
    ///
    /// Reads the whole body or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if no
    /// page is stored under `title`, or another kind if it can't be read.
    fn load(&self, title: &Title) -> Result<Page, StorageError>;

    /// Save a page, replacing any previous body stored under its title.
    ///
    /// A save either replaces the stored body completely or fails leaving the
    /// previous body in place. Concurrent saves to the same title are
    /// last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the body can't be written.
    fn save(&self, page: &Page) -> Result<(), StorageError>;

    /// Check if a page is stored under `title`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, title: &Title) -> bool {
        self.load(title).is_ok()
    }
}
