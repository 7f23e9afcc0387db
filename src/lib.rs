// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Character Pager
//!
//! Fetches a paginated character listing from a REST endpoint, keeps the
//! current page index, and warms the cache with the next page so paging
//! forward feels instant.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use character_pager::{build_pager, PagerConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut pager = build_pager(&PagerConfig::default())?;
//!     pager.load().await?;
//!
//!     if pager.go_to_next() {
//!         // Usually served from the prefetched cache entry
//!         pager.load().await?;
//!     }
//!     println!("{:?}", pager.view());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  intents   ┌──────────────┐  get_or_fetch / prefetch  ┌──────────────┐
//! │ render / cli │ ─────────▶ │    Pager     │ ────────────────────────▶ │  PageCache   │
//! │              │ ◀───────── │ (page index) │                           │ (MemoryCache)│
//! └──────────────┘  PageView  └──────────────┘                           └──────┬───────┘
//!                                                                               │ fetch_page
//!                                                                        ┌──────▼───────┐
//!                                                                        │ HttpFetcher  │
//!                                                                        └──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document the public record fields before publishing

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration
pub mod config;

/// HTTP client
pub mod http;

/// Page fetcher
pub mod fetch;

/// Page cache with request de-duplication
pub mod cache;

/// Page index state machine and prefetch policy
pub mod pager;

/// Text and JSON rendering
pub mod render;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use cache::{MemoryCache, PageCache};
pub use cli::{build_pager, HttpPager};
pub use config::PagerConfig;
pub use fetch::{Fetcher, HttpFetcher};
pub use pager::{LoadStatus, LoadTicket, PageView, Pager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
