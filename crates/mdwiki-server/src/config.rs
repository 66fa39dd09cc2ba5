//! Server configuration and startup errors.

use std::path::PathBuf;
use std::time::Duration;

use mdwiki_index::IndexError;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory holding the documents.
    pub pages_dir: PathBuf,
    /// Listen address as `host:port`. A bare `:port` binds all interfaces.
    pub listen: String,
    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,
    /// Application version (logged at startup).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            listen: "127.0.0.1:8080".to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            version: String::new(),
        }
    }
}

/// Error that prevents the server from starting or keeps it from running.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Pages directory cannot be inspected.
    #[error("failed to open pages directory {}: {source}", path.display())]
    PagesDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Pages path exists but is not a directory.
    #[error("pages path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// Listen address is empty.
    #[error("listen address must not be empty")]
    EmptyListenAddress,
    /// Initial index build failed.
    #[error("failed to read pages directory: {0}")]
    Index(#[source] IndexError),
    /// Listening socket could not be opened.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// Server stopped with an I/O error.
    #[error("http server failed: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerConfig {
    /// Check that the pages directory exists and the listen address is set.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), StartupError> {
        let metadata =
            std::fs::metadata(&self.pages_dir).map_err(|source| StartupError::PagesDirUnreadable {
                path: self.pages_dir.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(StartupError::NotADirectory(self.pages_dir.clone()));
        }
        if self.listen.trim().is_empty() {
            return Err(StartupError::EmptyListenAddress);
        }
        Ok(())
    }

    /// Listen address in a form the socket layer accepts.
    ///
    /// `:8080` expands to `0.0.0.0:8080`; everything else is passed through.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        let listen = self.listen.trim();
        if listen.starts_with(':') {
            format!("0.0.0.0{listen}")
        } else {
            listen.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validate_accepts_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            pages_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            pages_dir: temp_dir.path().join("missing"),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(StartupError::PagesDirUnreadable { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("page.md");
        std::fs::write(&file, "# Page").unwrap();
        let config = ServerConfig {
            pages_dir: file,
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(StartupError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_listen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            pages_dir: temp_dir.path().to_path_buf(),
            listen: "  ".to_owned(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(StartupError::EmptyListenAddress)
        ));
    }

    #[test]
    fn test_listen_addr_port_only() {
        let config = ServerConfig {
            listen: ":8080".to_owned(),
            ..Default::default()
        };

        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_listen_addr_passthrough() {
        let config = ServerConfig {
            listen: "localhost:3000".to_owned(),
            ..Default::default()
        };

        assert_eq!(config.listen_addr(), "localhost:3000");
    }
}
