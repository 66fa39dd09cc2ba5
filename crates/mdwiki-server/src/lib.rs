//! HTTP server for the mdwiki personal wiki.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - An index of every document in the pages directory
//! - Rendered views of individual documents
//! - Forms for creating and editing documents
//! - Delete and refresh endpoints
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdwiki_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         pages_dir: PathBuf::from("pages"),
//!         listen: "127.0.0.1:8080".to_owned(),
//!         ..Default::default()
//!     };
//!
//!     let server = Server::bind(config).await.unwrap();
//!     println!("Listening on {}", server.local_addr());
//!     server.serve().await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (mdwiki-server)
//!                        │
//!                        ├─► handlers ──► PageIndex (mdwiki-index)
//!                        │                    │
//!                        │                    └─► scan ──► Storage (mdwiki-storage)
//!                        │
//!                        ├─► handlers ──► Storage read/create/update/delete
//!                        │
//!                        └─► handlers ──► MarkdownRenderer (mdwiki-renderer)
//! ```
//!
//! The page index is a cache of file names. Creating, editing or deleting a
//! document does not touch it; `POST /refresh` rescans the directory.

mod app;
mod config;
mod error;
mod handlers;
mod middleware;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use mdwiki_index::PageIndex;
use mdwiki_storage::{FsStorage, Storage};
use tokio::net::TcpListener;

pub use app::create_router;
pub use config::{DEFAULT_REQUEST_TIMEOUT, ServerConfig, StartupError};
pub use error::ServerError;
pub use state::AppState;

/// Wiki server bound to its listening socket but not yet serving.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    app: Router,
    version: String,
}

impl Server {
    /// Validate the configuration, build the page index and bind the socket.
    ///
    /// The index is built before the socket is opened, so a bad pages
    /// directory never serves.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError`] if the pages directory is invalid, the
    /// initial index build fails, or the address cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.pages_dir.clone()));
        let index = PageIndex::load(Arc::clone(&storage)).map_err(StartupError::Index)?;
        tracing::info!(
            documents = index.len(),
            pages_dir = %config.pages_dir.display(),
            "Page index loaded"
        );

        let state = Arc::new(AppState::new(storage, Arc::new(index)));
        let app = create_router(state, config.request_timeout);

        let addr = config.listen_addr();
        let bind_error = |source| StartupError::Bind {
            addr: addr.clone(),
            source,
        };
        let listener = TcpListener::bind(&addr).await.map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        Ok(Self {
            listener,
            local_addr,
            app,
            version: config.version,
        })
    }

    /// Address the socket is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Serve`] if the server stops with an I/O error.
    pub async fn serve(self) -> Result<(), StartupError> {
        tracing::info!(address = %self.local_addr, version = %self.version, "Starting server");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        // Without a handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    fn config(pages_dir: &Path, listen: &str) -> ServerConfig {
        ServerConfig {
            pages_dir: pages_dir.to_path_buf(),
            listen: listen.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bind_reports_bound_address() {
        let temp_dir = tempfile::tempdir().unwrap();

        let server = Server::bind(config(temp_dir.path(), "127.0.0.1:0"))
            .await
            .unwrap();

        assert!(server.local_addr().ip().is_loopback());
        assert_ne!(server.local_addr().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_rejects_missing_directory_before_listening() {
        let temp_dir = tempfile::tempdir().unwrap();

        let result = Server::bind(config(&temp_dir.path().join("missing"), "127.0.0.1:0")).await;

        assert!(matches!(
            result,
            Err(StartupError::PagesDirUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_bind_fails_on_taken_port() {
        let temp_dir = tempfile::tempdir().unwrap();
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();

        let result = Server::bind(config(temp_dir.path(), &addr)).await;

        assert!(matches!(result, Err(StartupError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_serve_answers_http() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();
        let server = Server::bind(config(temp_dir.path(), "127.0.0.1:0"))
            .await
            .unwrap();
        let addr = server.local_addr();
        let handle = tokio::spawn(server.serve());

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        handle.abort();

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("guide.md"));
    }
}
