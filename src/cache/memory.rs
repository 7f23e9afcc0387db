//! In-memory page cache

use super::types::PageCache;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::types::{PageKey, PageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

type FetchOutcome = std::result::Result<Arc<PageResult>, Arc<Error>>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

enum Entry {
    Ready {
        value: Arc<PageResult>,
        fetched_at: DateTime<Utc>,
        stored: Instant,
    },
    InFlight {
        id: u64,
        future: SharedFetch,
    },
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<PageKey, Entry>,
    next_id: u64,
}

impl CacheState {
    // Whether `key` still maps to the fetch started with `id`
    fn is_current(&self, key: &PageKey, id: u64) -> bool {
        matches!(
            self.entries.get(key),
            Some(Entry::InFlight { id: current, .. }) if *current == id
        )
    }
}

enum Lookup {
    Hit(Arc<PageResult>),
    Joined(SharedFetch),
    Started(SharedFetch),
}

/// Page cache held in process memory
///
/// Must be used from inside a tokio runtime: misses spawn a task.
pub struct MemoryCache<F> {
    fetcher: Arc<F>,
    stale_after: Option<Duration>,
    state: Arc<Mutex<CacheState>>,
}

impl<F: Fetcher + 'static> MemoryCache<F> {
    /// Create a cache whose entries never go stale
    pub fn new(fetcher: F) -> Self {
        Self::with_fetcher(Arc::new(fetcher))
    }

    /// Create a cache sharing an existing fetcher
    pub fn with_fetcher(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            stale_after: None,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Treat entries older than `stale_after` as misses
    #[must_use]
    pub fn stale_after(mut self, stale_after: Option<Duration>) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// Number of entries, ready or in flight
    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    /// Whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, stored: Instant) -> bool {
        self.stale_after
            .map_or(true, |limit| stored.elapsed() < limit)
    }

    fn lookup(&self, key: &PageKey) -> Lookup {
        let mut state = lock(&self.state);

        match state.entries.get(key) {
            Some(Entry::Ready { value, stored, .. }) if self.is_fresh(*stored) => {
                debug!(%key, "Cache hit");
                return Lookup::Hit(Arc::clone(value));
            }
            Some(Entry::InFlight { future, .. }) => {
                debug!(%key, "Joining in-flight fetch");
                return Lookup::Joined(future.clone());
            }
            _ => {}
        }

        let id = state.next_id;
        state.next_id += 1;

        let fetcher = Arc::clone(&self.fetcher);
        let shared_state = Arc::clone(&self.state);
        let task_key = key.clone();

        debug!(%key, "Cache miss, fetching");
        let handle = tokio::spawn(async move {
            let fetch = AssertUnwindSafe(fetcher.fetch_page(task_key.page));
            let outcome: FetchOutcome = match fetch.catch_unwind().await {
                Ok(result) => result.map(Arc::new).map_err(Arc::new),
                Err(_) => Err(Arc::new(Error::Other(format!(
                    "Fetch of {task_key} panicked"
                )))),
            };

            let mut state = lock(&shared_state);
            if state.is_current(&task_key, id) {
                match &outcome {
                    Ok(value) => {
                        state.entries.insert(
                            task_key,
                            Entry::Ready {
                                value: Arc::clone(value),
                                fetched_at: Utc::now(),
                                stored: Instant::now(),
                            },
                        );
                    }
                    Err(_) => {
                        state.entries.remove(&task_key);
                    }
                }
            }
            outcome
        });

        // Cancelled before write-back; the entry must not keep a dead future.
        let abandoned_state = Arc::downgrade(&self.state);
        let abandoned_key = key.clone();
        let future = handle
            .map(move |joined| {
                joined.unwrap_or_else(|e| {
                    if let Some(shared_state) = abandoned_state.upgrade() {
                        let mut state = lock(&shared_state);
                        if state.is_current(&abandoned_key, id) {
                            state.entries.remove(&abandoned_key);
                        }
                    }
                    Err(Arc::new(Error::Other(format!("Fetch task failed: {e}"))))
                })
            })
            .boxed()
            .shared();

        state.entries.insert(
            key.clone(),
            Entry::InFlight {
                id,
                future: future.clone(),
            },
        );
        Lookup::Started(future)
    }
}

#[async_trait]
impl<F: Fetcher + 'static> PageCache for MemoryCache<F> {
    async fn get_or_fetch(&self, key: &PageKey) -> Result<Arc<PageResult>> {
        match self.lookup(key) {
            Lookup::Hit(value) => Ok(value),
            Lookup::Joined(future) | Lookup::Started(future) => {
                future.await.map_err(Error::Shared)
            }
        }
    }

    fn prefetch(&self, key: &PageKey) {
        if let Lookup::Started(future) = self.lookup(key) {
            let key = key.clone();
            tokio::spawn(async move {
                if let Err(e) = future.await {
                    debug!(%key, error = %e, "Discarded prefetch failure");
                }
            });
        }
    }

    fn peek(&self, key: &PageKey) -> Option<Arc<PageResult>> {
        match lock(&self.state).entries.get(key) {
            Some(Entry::Ready { value, stored, .. }) if self.is_fresh(*stored) => {
                Some(Arc::clone(value))
            }
            _ => None,
        }
    }

    fn is_fetching(&self, key: &PageKey) -> bool {
        matches!(
            lock(&self.state).entries.get(key),
            Some(Entry::InFlight { .. })
        )
    }

    fn fetched_at(&self, key: &PageKey) -> Option<DateTime<Utc>> {
        match lock(&self.state).entries.get(key) {
            Some(Entry::Ready { fetched_at, .. }) => Some(*fetched_at),
            _ => None,
        }
    }

    fn invalidate(&self, key: &PageKey) {
        lock(&self.state).entries.remove(key);
    }

    fn clear(&self) {
        lock(&self.state).entries.clear();
    }
}

impl<F> std::fmt::Debug for MemoryCache<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("stale_after", &self.stale_after)
            .field("entries", &lock(&self.state).entries.len())
            .finish_non_exhaustive()
    }
}

// The guarded map is never left half-updated, so a poisoned lock is still usable.
fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
