//! Fetcher trait and HTTP implementation

use super::types::ListingResponse;
use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{PageIndex, PageResult};
use async_trait::async_trait;
use tracing::debug;

/// Reads one page of the listing
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the page at `page` (zero-based)
    ///
    /// Fails with a network error when the remote call fails and with a
    /// parse error when the body does not have the listing shape.
    async fn fetch_page(&self, page: PageIndex) -> Result<PageResult>;
}

/// Fetcher backed by the remote listing endpoint
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: HttpClient,
    base_url: String,
    page_param: String,
    start_page: u32,
}

impl HttpFetcher {
    /// Create a fetcher from the pager configuration
    pub fn new(config: &PagerConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(config.http_client_config())?;
        Ok(Self::with_client(client, config))
    }

    /// Create a fetcher reusing an existing client
    pub fn with_client(client: HttpClient, config: &PagerConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            page_param: config.page_param.clone(),
            start_page: config.start_page,
        }
    }

    /// Remote page number sent for a page index
    pub fn remote_page(&self, page: PageIndex) -> u32 {
        self.start_page.saturating_add(page)
    }

    /// Parse a listing body
    pub fn parse_body(body: &str) -> Result<PageResult> {
        let listing: ListingResponse =
            serde_json::from_str(body).map_err(|e| Error::parse(e.to_string()))?;
        Ok(listing.into())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, page: PageIndex) -> Result<PageResult> {
        let remote = self.remote_page(page);
        let request = RequestConfig::new().query(&self.page_param, remote.to_string());
        let body = self
            .client
            .get_text_with_config(&self.base_url, request)
            .await?;

        let result = Self::parse_body(&body)?;
        debug!(
            page,
            remote,
            items = result.items.len(),
            next = result.next_page_exists,
            "Fetched page"
        );
        Ok(result)
    }
}
