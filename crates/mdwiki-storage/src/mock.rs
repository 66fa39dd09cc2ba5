//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::name::DocumentName;
use crate::storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores files in memory. Use the builder methods to configure the mock
/// with test data, and [`set_unavailable`](Self::set_unavailable) to make
/// scans fail. Scans and per-document calls are counted separately.
///
/// # Example
///
/// ```ignore
/// use mdwiki_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide.md", "# User Guide");
///
/// let names = storage.scan().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
    scans: AtomicUsize,
    accesses: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given raw name and content.
    ///
    /// The name is not validated, so non-document files can be staged too.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(name.into(), content.into());
        self
    }

    /// Remove a file behind the caller's back, as an out-of-band delete would.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_file(&self, name: &str) {
        self.files.write().unwrap().remove(name);
    }

    /// Add or replace a file behind the caller's back.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn put_file(&self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap()
            .insert(name.into(), content.into());
    }

    /// Make subsequent scans fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of scans performed so far.
    #[must_use]
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Number of `read`, `create`, `update` and `delete` calls so far.
    #[must_use]
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    fn record_access(&self) {
        self.accesses.fetch_add(1, Ordering::SeqCst);
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Unavailable).with_backend(BACKEND));
        }
        Ok(self.files.read().unwrap().keys().cloned().collect())
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, StorageError> {
        self.record_access();
        self.files
            .read()
            .unwrap()
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| StorageError::not_found(name.as_str()).with_backend(BACKEND))
    }

    fn create(
        &self,
        name: &DocumentName,
        content: &[u8],
        overwrite: bool,
    ) -> Result<(), StorageError> {
        self.record_access();
        let mut files = self.files.write().unwrap();
        if !overwrite && files.contains_key(name.as_str()) {
            return Err(StorageError::new(StorageErrorKind::AlreadyExists)
                .with_path(name.as_str())
                .with_backend(BACKEND));
        }
        files.insert(name.as_str().to_owned(), content.to_vec());
        Ok(())
    }

    fn update(&self, name: &DocumentName, content: &[u8]) -> Result<(), StorageError> {
        self.record_access();
        let mut files = self.files.write().unwrap();
        let slot = files
            .get_mut(name.as_str())
            .ok_or_else(|| StorageError::not_found(name.as_str()).with_backend(BACKEND))?;
        *slot = content.to_vec();
        Ok(())
    }

    fn delete(&self, name: &DocumentName) -> Result<(), StorageError> {
        self.record_access();
        self.files
            .write()
            .unwrap()
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(name.as_str()).with_backend(BACKEND))
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
