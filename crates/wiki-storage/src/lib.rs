//! Page model and storage abstraction for the wiki.
//!
//! This crate provides the [`Page`] entity, the validated [`Title`] that names it,
//! and a [`PageStore`] trait that abstracts where page bodies live. This enables:
//!
//! - **Unit testing** of handlers without touching the real filesystem
//! - **Backend flexibility** (the filesystem backend lives in `wiki-storage-fs`)
//! - **A single safety boundary**: a [`Title`] can only be built through validation,
//!   so every key that reaches a backend is already known to be safe
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`] and [`Title`] value types
//! - [`PageStore`] trait with `load()`, `save()`, and `exists()` methods
//! - [`StorageError`] with semantic [`StorageErrorKind`] categories
//! - [`MockPageStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use wiki_storage::{Page, PageStore, Title};
//!
//! let title = Title::new("FrontPage")?;
//! store.save(&Page::new(title.clone(), b"Hello".to_vec()))?;
//! let page = store.load(&title)?;
//! assert_eq!(page.body, b"Hello");
//! ```

#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockPageStore;
pub use page::{Page, Title, TitleError};
pub use storage::{PageStore, StorageError, StorageErrorKind};
