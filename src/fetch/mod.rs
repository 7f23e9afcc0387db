//! Fetch module
//!
//! Reads one page of the remote listing per call.
//!
//! # Overview
//!
//! [`Fetcher`] is the seam the cache calls through. [`HttpFetcher`] is the
//! production implementation: one `GET <base>?page=<n>` per call, no retries,
//! and the body parsed into a [`PageResult`](crate::types::PageResult).

mod fetcher;
mod types;

pub use fetcher::{Fetcher, HttpFetcher};
pub use types::{ListingInfo, ListingResponse};
