//! Pager state types

use crate::types::{Character, PageIndex, PageKey};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Load state of the current page index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Selected but not requested yet
    #[default]
    Idle,
    /// Foreground fetch in flight
    Loading,
    /// Result available and displayed
    Loaded,
    /// Foreground fetch failed
    Errored(String),
}

impl LoadStatus {
    /// Whether a load for the current index is pending or running
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading)
    }
}

/// Handle for one foreground load
///
/// Results are matched back to the pager by page index, so a ticket for an
/// index the user already navigated away from is recognised as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) key: PageKey,
}

impl LoadTicket {
    /// Page index this load is for
    pub fn page(&self) -> PageIndex {
        self.key.page
    }

    /// Cache key this load reads
    pub fn key(&self) -> &PageKey {
        &self.key
    }
}

/// Everything the presentation layer needs to draw the pager
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageView {
    /// Zero-based index of the selected page
    pub current_page_index: PageIndex,
    /// Records to show
    pub items: Vec<Character>,
    /// Total pages, zero when unknown
    pub total_pages: u32,
    /// Showing an older page while the selected one loads
    pub is_background_refreshing: bool,
    /// "Next" is enabled
    pub has_next: bool,
    /// "Previous" is enabled
    pub has_previous: bool,
    /// The selected page failed to load
    pub has_error: bool,
    /// Nothing to show yet
    pub has_loading: bool,
    /// Failure detail when `has_error` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the shown page was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}
