//! Mock page store for testing.
//!
//! Provides [`MockPageStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::page::{Page, Title};
use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory page store for testing.
///
/// Counts every `load` and `save` so tests can assert that a request never
/// reached the store, and can be switched into a mode where every save fails.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockPageStore, PageStore, Title};
///
/// let store = MockPageStore::new().with_page("Alpha", "Hello");
/// let page = store.load(&Title::new("Alpha")?)?;
/// assert_eq!(store.loads(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockPageStore {
    pages: RwLock<HashMap<Title, Vec<u8>>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MockPageStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page.
    ///
    /// # Panics
    ///
    /// Panics if `title` is not a valid title or the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: &str, body: impl Into<Vec<u8>>) -> Self {
        let title = Title::new(title).unwrap();
        self.pages.write().unwrap().insert(title, body.into());
        self
    }

    /// Make every subsequent save fail with a permission error.
    #[must_use]
    pub fn with_failing_saves(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Number of `load` calls so far.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far, including failed ones.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Stored body for `title`, bypassing the call counters.
    ///
    /// # Panics
    ///
    /// Panics if `title` is not a valid title or the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        let title = Title::new(title).unwrap();
        self.pages.read().unwrap().get(&title).cloned()
    }
}

impl PageStore for MockPageStore {
    fn load(&self, title: &Title) -> Result<Page, StorageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.pages
            .read()
            .unwrap()
            .get(title)
            .map(|body| Page::new(title.clone(), body.clone()))
            .ok_or_else(|| StorageError::not_found(title.as_str()).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(page.title.as_str())
                .with_backend(BACKEND));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        Ok(())
    }
}
