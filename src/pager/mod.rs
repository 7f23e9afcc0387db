//! Pager module
//!
//! Holds the current page index and drives loads through a
//! [`PageCache`](crate::cache::PageCache).
//!
//! # Overview
//!
//! Each page index moves through `idle → loading → {loaded | errored}`.
//! While a newly selected index is loading, the previously displayed page
//! stays visible and is flagged as background-refreshing. Once a page is
//! loaded and reports a further page, the pager warms the cache for it.
//!
//! Loads are split into [`Pager::begin_load`], [`Pager::fetch`] and
//! [`Pager::complete_load`] so an event loop can keep handling input while a
//! fetch is in flight. [`Pager::load`] runs all three for sequential callers.

mod navigator;
mod types;

pub use navigator::Pager;
pub use types::{LoadStatus, LoadTicket, PageView};
