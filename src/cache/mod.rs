//! Page cache module
//!
//! Request de-duplication and memoization keyed by [`PageKey`](crate::types::PageKey).
//!
//! # Overview
//!
//! The pager only talks to the [`PageCache`] trait, so any cache can sit
//! behind it. [`MemoryCache`] is the in-process implementation:
//!
//! - one outstanding fetch per key; later callers join it
//! - fetches run on their own task and land in the cache even when nobody
//!   is waiting any more
//! - failures are not cached, the next miss fetches again

mod memory;
mod types;

pub use memory::MemoryCache;
pub use types::PageCache;
