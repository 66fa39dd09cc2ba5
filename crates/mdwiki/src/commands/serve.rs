//! Server command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use mdwiki_server::{Server, ServerConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for serving the wiki.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Directory holding the markdown documents.
    #[arg(long, default_value = "pages")]
    pub pages: PathBuf,

    /// Address to listen on, as host:port (a bare :port binds all interfaces).
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: u64,

    /// Enable verbose output (request and index logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Build the server configuration from the parsed flags.
    fn server_config(self, version: &str) -> ServerConfig {
        ServerConfig {
            pages_dir: self.pages,
            listen: self.listen,
            request_timeout: Duration::from_secs(self.request_timeout),
            version: version.to_owned(),
        }
    }

    /// Start the server and block until it shuts down.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages directory is unusable, the address
    /// cannot be bound, or the server stops with an I/O error.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.server_config(version);
        let pages_dir = config.pages_dir.clone();

        let server = Server::bind(config).await?;

        output.highlight(&format!("mdwiki {version}"));
        output.info(&format!("Pages directory: {}", pages_dir.display()));
        output.info(&format!("Listening on http://{}", server.local_addr()));

        server.serve().await?;

        Ok(())
    }
}
