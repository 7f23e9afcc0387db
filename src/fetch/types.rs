//! Listing wire format

use crate::types::{Character, PageResult};
use serde::{Deserialize, Serialize};

/// Body returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResponse {
    /// Pagination metadata
    pub info: ListingInfo,
    /// Records on this page, in order
    pub results: Vec<Character>,
}

/// Pagination metadata of a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingInfo {
    /// Total number of records
    #[serde(default)]
    pub count: Option<u64>,
    /// Total number of pages
    #[serde(default)]
    pub pages: Option<u32>,
    /// URL of the next page, null on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, null on the first page
    #[serde(default)]
    pub prev: Option<String>,
}

impl From<ListingResponse> for PageResult {
    fn from(response: ListingResponse) -> Self {
        Self {
            items: response.results,
            total_pages: response.info.pages,
            total_count: response.info.count,
            next_page_exists: response.info.next.is_some(),
        }
    }
}
