//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated character browser
#[derive(Parser, Debug)]
#[command(name = "character-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Listing endpoint, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Disable next-page prefetch
    #[arg(long, global = true)]
    pub no_prefetch: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through the listing (n = next, p = previous, q = quit)
    Browse,

    /// Print one page
    Page {
        /// Zero-based page index
        #[arg(default_value = "0")]
        index: u32,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON output (one object per line: a view or a notice)
    Json,
}

/// A line of input in `browse`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    NextPage,
    PreviousPage,
    Quit,
    Unknown,
}

impl Intent {
    /// Parse a line typed by the user
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Self::NextPage,
            "p" | "prev" | "previous" => Self::PreviousPage,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parse() {
        assert_eq!(Intent::parse("n"), Intent::NextPage);
        assert_eq!(Intent::parse(" Next \n"), Intent::NextPage);
        assert_eq!(Intent::parse("p"), Intent::PreviousPage);
        assert_eq!(Intent::parse("previous"), Intent::PreviousPage);
        assert_eq!(Intent::parse("q"), Intent::Quit);
        assert_eq!(Intent::parse("jump"), Intent::Unknown);
    }

    #[test]
    fn test_cli_parse_page() {
        let cli = Cli::parse_from([
            "character-pager",
            "--format",
            "json",
            "page",
            "3",
            "--no-prefetch",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.no_prefetch);
        assert!(matches!(cli.command, Commands::Page { index: 3 }));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["character-pager", "browse"]);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Browse));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
