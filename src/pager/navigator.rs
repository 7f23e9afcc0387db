//! Pager state machine

use super::types::{LoadStatus, LoadTicket, PageView};
use crate::cache::PageCache;
use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::types::{PageIndex, PageKey, PageResult};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct Displayed {
    index: PageIndex,
    result: Arc<PageResult>,
}

/// Current page index plus the page shown for it
pub struct Pager<C: ?Sized> {
    cache: Arc<C>,
    resource: String,
    prefetch: bool,
    page: PageIndex,
    status: LoadStatus,
    displayed: Option<Displayed>,
    prefetched_for: Option<PageIndex>,
}

impl<C: PageCache + ?Sized + 'static> Pager<C> {
    /// Create a pager at page 0 with prefetch enabled
    pub fn new(cache: Arc<C>, resource: impl Into<String>) -> Self {
        Self {
            cache,
            resource: resource.into(),
            prefetch: true,
            page: 0,
            status: LoadStatus::Idle,
            displayed: None,
            prefetched_for: None,
        }
    }

    /// Create a pager from the configuration
    pub fn from_config(cache: Arc<C>, config: &PagerConfig) -> Self {
        Self::new(cache, config.resource.clone()).with_prefetch(config.prefetch)
    }

    /// Enable or disable next-page prefetch
    #[must_use]
    pub fn with_prefetch(mut self, enabled: bool) -> Self {
        self.prefetch = enabled;
        self
    }

    /// Start at `page` instead of 0. Only valid before the first load.
    #[must_use]
    pub fn starting_at(mut self, page: PageIndex) -> Self {
        self.page = page;
        self
    }

    /// Current page index
    pub fn page(&self) -> PageIndex {
        self.page
    }

    /// Load state of the current page index
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The cache this pager reads through
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    fn key(&self, page: PageIndex) -> PageKey {
        PageKey::new(self.resource.clone(), page)
    }

    fn current(&self) -> Option<&Displayed> {
        self.displayed.as_ref().filter(|d| d.index == self.page)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Whether a next page can be selected
    ///
    /// Only true once the current index has loaded and reported a further
    /// page. Navigation and the view both read this. The last representable
    /// index never has a next page.
    pub fn has_next(&self) -> bool {
        self.page < PageIndex::MAX
            && self.status == LoadStatus::Loaded
            && self
                .current()
                .is_some_and(|d| d.result.next_page_exists)
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Select the next page when the current one reports more data
    ///
    /// Returns whether the index changed.
    pub fn go_to_next(&mut self) -> bool {
        if !self.has_next() {
            debug!(page = self.page, "No next page");
            return false;
        }
        self.select(self.page + 1);
        true
    }

    /// Select the previous page, floored at 0
    ///
    /// Returns whether the index changed.
    pub fn go_to_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.select(self.page - 1);
        true
    }

    fn select(&mut self, page: PageIndex) {
        info!(from = self.page, to = page, "Changing page");
        self.page = page;
        self.status = LoadStatus::Idle;
        self.prefetched_for = None;
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Whether the current index still needs a load
    pub fn needs_load(&self) -> bool {
        self.status == LoadStatus::Idle
    }

    /// Start loading the current index
    ///
    /// A cached page is applied at once and `None` is returned. Otherwise the
    /// status moves to `Loading` and a ticket for the fetch is returned.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let key = self.key(self.page);
        if let Some(result) = self.cache.peek(&key) {
            debug!(%key, "Serving page from cache");
            self.apply(self.page, result);
            return None;
        }
        self.status = LoadStatus::Loading;
        Some(LoadTicket { key })
    }

    /// Fetch for a ticket, independent of the pager borrow
    pub fn fetch(&self, ticket: &LoadTicket) -> BoxFuture<'static, Result<Arc<PageResult>>> {
        let cache = Arc::clone(&self.cache);
        let key = ticket.key.clone();
        async move { cache.get_or_fetch(&key).await }.boxed()
    }

    /// Apply the outcome of a foreground fetch
    ///
    /// Returns false when the ticket is for an index that is no longer
    /// current. Such results stay in the cache only.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<Arc<PageResult>>,
    ) -> bool {
        if ticket.page() != self.page || self.status != LoadStatus::Loading {
            debug!(page = ticket.page(), current = self.page, "Ignoring stale load");
            return false;
        }
        match outcome {
            Ok(result) => self.apply(ticket.page(), result),
            Err(e) => {
                warn!(
                    page = ticket.page(),
                    kind = ?e.kind(),
                    error = %e,
                    "Could not load page"
                );
                self.status = LoadStatus::Errored(e.to_string());
            }
        }
        true
    }

    /// Load the current index and wait for it
    pub async fn load(&mut self) -> Result<()> {
        let Some(ticket) = self.begin_load() else {
            return Ok(());
        };
        match self.fetch(&ticket).await {
            Ok(result) => {
                self.complete_load(&ticket, Ok(result));
                Ok(())
            }
            Err(e) => {
                let e = Arc::new(e);
                self.complete_load(&ticket, Err(Error::Shared(Arc::clone(&e))));
                Err(Error::Shared(e))
            }
        }
    }

    fn apply(&mut self, index: PageIndex, result: Arc<PageResult>) {
        self.status = LoadStatus::Loaded;
        self.displayed = Some(Displayed {
            index,
            result: Arc::clone(&result),
        });
        self.on_page_result_available(index, &result);
    }

    /// React to a loaded page: warm the cache for the page after it
    ///
    /// Ignored for indices that are not current. Issued at most once per
    /// selected index.
    pub fn on_page_result_available(&mut self, index: PageIndex, result: &PageResult) {
        if index != self.page || !self.prefetch || !result.next_page_exists {
            return;
        }
        if self.prefetched_for == Some(index) {
            return;
        }
        if index == PageIndex::MAX {
            return;
        }
        self.prefetched_for = Some(index);
        let key = self.key(index).next();
        debug!(%key, "Prefetching next page");
        self.cache.prefetch(&key);
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Snapshot for the presentation layer
    pub fn view(&self) -> PageView {
        let mut view = PageView {
            current_page_index: self.page,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            ..PageView::default()
        };

        if let LoadStatus::Errored(message) = &self.status {
            view.has_error = true;
            view.error = Some(message.clone());
            return view;
        }

        match &self.displayed {
            Some(shown) => {
                view.items = shown.result.items.clone();
                view.total_pages = shown.result.total_pages_or_zero();
                view.is_background_refreshing =
                    shown.index != self.page && self.status.is_pending();
                view.fetched_at = self.cache.fetched_at(&self.key(shown.index));
            }
            None => view.has_loading = true,
        }
        view
    }
}

impl<C: ?Sized> std::fmt::Debug for Pager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("resource", &self.resource)
            .field("page", &self.page)
            .field("status", &self.status)
            .field("prefetch", &self.prefetch)
            .finish_non_exhaustive()
    }
}
