//! CLI error types.

use mdwiki_server::StartupError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("failed to create async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("{0}")]
    Startup(#[from] StartupError),
}
