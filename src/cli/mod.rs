//! CLI module
//!
//! Command-line interface for browsing the listing.
//!
//! # Commands
//!
//! - `browse` - Page through the listing interactively
//! - `page` - Print a single page
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, Intent, OutputFormat};
pub use runner::{browse, build_pager, write_notice, write_view, HttpPager, Runner};
