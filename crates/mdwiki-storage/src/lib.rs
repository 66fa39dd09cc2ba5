//! Document storage for mdwiki.
//!
//! This crate provides a [`Storage`] trait for reading, writing and deleting
//! documents kept as files in a single flat directory. This enables:
//!
//! - **Unit testing** of the page index and handlers without a real directory
//! - **Clean separation** between request handling and filesystem I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocumentName`], the validated identifier every storage call takes
//! - [`Storage`] trait with `scan()`, `read()`, `create()`, `update()` and `delete()`
//! - [`FsStorage`] implementation backed by a local directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdwiki_storage::{DocumentName, FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("pages"));
//! let name = DocumentName::parse("hello.md")?;
//! storage.create(&name, b"# Hello")?;
//! let content = storage.read(&name)?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod name;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use name::{DOCUMENT_SUFFIX, DocumentName, NameError};
pub use storage::{Storage, StorageError, StorageErrorKind};
