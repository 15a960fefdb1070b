//! Filesystem page store for the wiki.
//!
//! This crate provides [`FsPageStore`], a filesystem-based implementation of the
//! [`PageStore`](wiki_storage::PageStore) trait. Each page is one flat file
//! named `<title>.<extension>` inside a root directory, holding the raw body
//! bytes with no header or metadata.
//!
//! Saves write to a hidden temporary file in the same directory and rename it
//! over the page file, so readers only ever see a complete body.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::{Page, PageStore, Title};
//! use wiki_storage_fs::FsPageStore;
//!
//! let store = FsPageStore::new(PathBuf::from("."));
//! store.save(&Page::new(Title::new("Alpha")?, "Hello"))?;
//! // ./Alpha.txt now contains "Hello"
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use wiki_storage::{Page, PageStore, StorageError, Title};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default page file extension.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Filesystem page store.
///
/// Maps a title to `<root>/<title>.<extension>`. Titles are ASCII
/// alphanumeric, so as long as the extension is too the mapping is injective
/// and never leaves `root`.
#[derive(Debug, Clone)]
pub struct FsPageStore {
    /// Directory holding page files.
    root: PathBuf,
    /// Page file extension, without the dot.
    extension: String,
}

impl FsPageStore {
    /// Create a store rooted at `root` using the `txt` extension.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    /// Create a store with a custom page file extension.
    ///
    /// The extension must be non-empty ASCII alphanumeric; configuration
    /// loading enforces this before a store is built.
    #[must_use]
    pub fn with_extension(root: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            root,
            extension: extension.into(),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file a page is stored in.
    #[must_use]
    pub fn key_path(&self, title: &Title) -> PathBuf {
        self.root.join(format!("{title}.{}", self.extension))
    }

    /// Create the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory can't be created.
    pub fn create_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::io(e, &self.root).with_backend(BACKEND))
    }
}

impl PageStore for FsPageStore {
    fn load(&self, title: &Title) -> Result<Page, StorageError> {
        let path = self.key_path(title);
        tracing::info!(op = "load", path = %path.display(), "Loading page");

        let body = fs::read(&path)
            .map_err(|e| StorageError::io(e, &path).with_backend(BACKEND))?;
        Ok(Page::new(title.clone(), body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.key_path(&page.title);
        tracing::info!(op = "save", path = %path.display(), bytes = page.body.len(), "Saving page");

        let io_error = |e: std::io::Error| StorageError::io(e, &path).with_backend(BACKEND);

        // Temp files start with '.', which no title can, so they never shadow a page.
        // tempfile creates them owner-only (0600 on Unix); rename keeps the mode.
        let mut file = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .map_err(io_error)?;
        file.write_all(&page.body).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&path).map_err(|e| io_error(e.error))?;

        Ok(())
    }

    fn exists(&self, title: &Title) -> bool {
        self.key_path(title).is_file()
    }
}
