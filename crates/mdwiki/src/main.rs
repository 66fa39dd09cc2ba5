//! mdwiki CLI - personal wiki over a directory of markdown files.
//!
//! Serves the documents in `--pages` on `--listen` until interrupted.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// mdwiki - minimal personal wiki.
#[derive(Parser)]
#[command(name = "mdwiki", version, about)]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR
    let filter = if cli.serve.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::Runtime)
        .and_then(|rt| rt.block_on(cli.serve.execute(VERSION)));

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mdwiki"]).unwrap();

        assert_eq!(cli.serve.pages, PathBuf::from("pages"));
        assert_eq!(cli.serve.listen, "127.0.0.1:8080");
        assert_eq!(cli.serve.request_timeout, 30);
        assert!(!cli.serve.verbose);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "mdwiki",
            "--pages",
            "/srv/wiki",
            "--listen",
            ":9000",
            "--request-timeout",
            "5",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.serve.pages, PathBuf::from("/srv/wiki"));
        assert_eq!(cli.serve.listen, ":9000");
        assert_eq!(cli.serve.request_timeout, 5);
        assert!(cli.serve.verbose);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["mdwiki", "--port", "80"]).is_err());
    }
}
