// Allow common clippy pedantic lints
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]

//! Character pager CLI
//!
//! Command-line interface for browsing the character listing

use character_pager::cli::{Cli, Runner};
use character_pager::LogLevel;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level: tracing::Level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    }
    .into();

    // Logs go to stderr so they never interleave with rendered pages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
