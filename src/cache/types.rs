//! Cache traits

use crate::error::Result;
use crate::types::{PageKey, PageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Get-or-fetch cache of listing pages
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Return the cached page, joining or starting a fetch on a miss
    async fn get_or_fetch(&self, key: &PageKey) -> Result<Arc<PageResult>>;

    /// Start a fetch for `key` unless it is cached or already in flight
    ///
    /// Never waits and never reports failure.
    fn prefetch(&self, key: &PageKey);

    /// Cached page for `key`, without any I/O
    fn peek(&self, key: &PageKey) -> Option<Arc<PageResult>>;

    /// Whether a fetch for `key` is in flight
    fn is_fetching(&self, key: &PageKey) -> bool;

    /// When the cached page for `key` was stored
    fn fetched_at(&self, _key: &PageKey) -> Option<DateTime<Utc>> {
        None
    }

    /// Drop the entry for `key`
    fn invalidate(&self, key: &PageKey);

    /// Drop every entry
    fn clear(&self);
}
