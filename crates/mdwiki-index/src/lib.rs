//! In-memory page index for mdwiki.
//!
//! Provides [`PageIndex`], the authoritative set of document names the wiki
//! serves. The set is built by scanning a [`Storage`] backend and replaced
//! wholesale on [`rebuild`](PageIndex::rebuild); it is never patched
//! incrementally.
//!
//! # Thread Safety
//!
//! `PageIndex` is designed for concurrent access:
//! - `snapshot()` returns `Arc<BTreeSet<DocumentName>>` with minimal locking (just Arc clone)
//! - `rebuild()` is serialized by a dedicated mutex; the scan runs outside the
//!   snapshot lock, and the new set is swapped in under a short write lock
//! - readers observe the old set or the new set, never a mix
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use mdwiki_index::PageIndex;
//! use mdwiki_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("pages")));
//! let index = PageIndex::load(storage)?;
//! for name in index.snapshot().iter() {
//!     println!("{name}");
//! }
//! ```

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, RwLock};

use mdwiki_storage::{DocumentName, Storage, StorageError};

/// Error returned when the index cannot be (re)built.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The backing store could not be enumerated.
    #[error("pages store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
}

/// Set of document names known to the wiki.
pub struct PageIndex {
    storage: Arc<dyn Storage>,
    /// Mutex for serializing rebuild operations.
    reload_lock: Mutex<()>,
    /// Current set of names (atomically swappable).
    current: RwLock<Arc<BTreeSet<DocumentName>>>,
}

impl PageIndex {
    /// Create an empty index over `storage`.
    ///
    /// Nothing is scanned until [`rebuild`](Self::rebuild) is called.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(BTreeSet::new())),
        }
    }

    /// Create an index over `storage` and populate it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StoreUnavailable`] if the initial scan fails.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, IndexError> {
        let index = Self::new(storage);
        index.rebuild()?;
        Ok(index)
    }

    /// Scan the store and return the names that qualify as documents.
    ///
    /// Entries whose name is not a valid [`DocumentName`] (wrong suffix,
    /// hidden files) are skipped. Does not touch the held set.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StoreUnavailable`] if the store cannot be listed.
    pub fn scan(&self) -> Result<BTreeSet<DocumentName>, IndexError> {
        let entries = self.storage.scan().map_err(IndexError::StoreUnavailable)?;

        let names = entries
            .iter()
            .filter_map(|entry| match DocumentName::parse(entry) {
                Ok(name) => Some(name),
                Err(err) => {
                    tracing::trace!(entry = %entry, reason = %err, "Ignoring non-document entry");
                    None
                }
            })
            .collect();

        Ok(names)
    }

    /// Rescan the store and replace the held set.
    ///
    /// Only one rebuild runs at a time. On failure the existing set is left
    /// untouched. Returns the number of indexed documents.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StoreUnavailable`] if the scan fails.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn rebuild(&self) -> Result<usize, IndexError> {
        let _guard = self.reload_lock.lock().unwrap();

        let names = Arc::new(self.scan()?);
        let count = names.len();
        *self.current.write().unwrap() = names;

        tracing::info!(documents = count, location = %self.storage.location(), "Page index rebuilt");
        Ok(count)
    }

    /// Check whether `name` is currently indexed.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn contains(&self, name: &DocumentName) -> bool {
        self.current.read().unwrap().contains(name)
    }

    /// Get the current set of names.
    ///
    /// Returns an `Arc` that can be used without holding any lock.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<BTreeSet<DocumentName>> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Location of the backing store, for diagnostics.
    #[must_use]
    pub fn location(&self) -> String {
        self.storage.location()
    }
}
