//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for documents kept as files in one local directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::name::DocumentName;
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Documents are the regular files directly inside `pages_dir`.
/// Subdirectories and other entries are listed by nobody and never touched.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use mdwiki_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("pages"));
/// let names = storage.scan()?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Directory holding the documents.
    pages_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `pages_dir`.
    #[must_use]
    pub fn new(pages_dir: PathBuf) -> Self {
        Self { pages_dir }
    }

    fn document_path(&self, name: &DocumentName) -> PathBuf {
        self.pages_dir.join(name.as_str())
    }

    fn io_error(err: std::io::Error, path: PathBuf) -> StorageError {
        StorageError::io(err, Some(path)).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.pages_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable)
                .with_path(&self.pages_dir)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error(e, self.pages_dir.clone()))?;

            // Symlinks are followed so a linked document still counts.
            let is_file = fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
            if !is_file {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::debug!(name = ?raw, "Skipping non UTF-8 file name");
                }
            }
        }

        Ok(names)
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, StorageError> {
        let path = self.document_path(name);
        fs::read(&path).map_err(|e| Self::io_error(e, path))
    }

    fn create(
        &self,
        name: &DocumentName,
        content: &[u8],
        overwrite: bool,
    ) -> Result<(), StorageError> {
        let path = self.document_path(name);
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            // Fails atomically if the file exists.
            options.create_new(true);
        }

        let mut file = options
            .open(&path)
            .map_err(|e| Self::io_error(e, path.clone()))?;
        file.write_all(content)
            .map_err(|e| Self::io_error(e, path))?;
        Ok(())
    }

    fn update(&self, name: &DocumentName, content: &[u8]) -> Result<(), StorageError> {
        let path = self.document_path(name);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Self::io_error(e, path.clone()))?;
        file.write_all(content)
            .map_err(|e| Self::io_error(e, path))?;
        Ok(())
    }

    fn delete(&self, name: &DocumentName) -> Result<(), StorageError> {
        let path = self.document_path(name);
        fs::remove_file(&path).map_err(|e| Self::io_error(e, path))
    }

    fn location(&self) -> String {
        self.pages_dir.display().to_string()
    }
}
