//! Test doubles shared by the unit tests

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::types::{Character, PageIndex, PageResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Fetcher serving synthetic pages, recording every call
pub(crate) struct ScriptedFetcher {
    total_pages: u32,
    failing: HashSet<PageIndex>,
    panicking: HashSet<PageIndex>,
    gate: Option<Arc<Semaphore>>,
    calls: Mutex<Vec<PageIndex>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            failing: HashSet::new(),
            panicking: HashSet::new(),
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make fetches of `page` fail with a 500
    pub(crate) fn failing(mut self, page: PageIndex) -> Self {
        self.failing.insert(page);
        self
    }

    /// Make fetches of `page` panic
    pub(crate) fn panicking(mut self, page: PageIndex) -> Self {
        self.panicking.insert(page);
        self
    }

    /// Hold every fetch until a permit is added to the returned semaphore
    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub(crate) fn calls(&self) -> Vec<PageIndex> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, page: PageIndex) -> usize {
        self.calls().iter().filter(|p| **p == page).count()
    }
}

/// The page `ScriptedFetcher` serves for `page`
pub(crate) fn synthetic_page(page: PageIndex, total_pages: u32) -> PageResult {
    let items = (0..2)
        .map(|i| {
            let id = u64::from(page) * 2 + i + 1;
            Character {
                id,
                name: format!("Character {id}"),
                gender: "unknown".to_string(),
                image_url: format!("https://img.example.com/{id}.jpeg"),
            }
        })
        .collect();
    PageResult {
        items,
        total_pages: Some(total_pages),
        total_count: Some(u64::from(total_pages) * 2),
        next_page_exists: page + 1 < total_pages,
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch_page(&self, page: PageIndex) -> Result<PageResult> {
        self.calls.lock().unwrap().push(page);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.panicking.contains(&page) {
            panic!("scripted panic for page {page}");
        }
        if self.failing.contains(&page) || page >= self.total_pages {
            return Err(Error::http_status(500, "scripted failure"));
        }
        Ok(synthetic_page(page, self.total_pages))
    }
}

/// Yield to spawned tasks until `condition` holds
pub(crate) async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
