//! Common types used throughout the character pager
//!
//! This module contains the data model shared by the fetcher, the cache
//! and the pager.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Zero-based page index
pub type PageIndex = u32;

// ============================================================================
// Records
// ============================================================================

/// A single character record
///
/// Passed through as received. Only presence of the fields is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub gender: String,
    /// Avatar URL (`image` on the wire)
    #[serde(rename = "image")]
    pub image_url: String,
}

/// One page of results plus pagination metadata
///
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResult {
    /// Ordered records on this page
    pub items: Vec<Character>,
    /// Total number of pages, when the listing reports it
    pub total_pages: Option<u32>,
    /// Total number of records, when the listing reports it
    pub total_count: Option<u64>,
    /// Whether the listing points at a further page
    pub next_page_exists: bool,
}

impl PageResult {
    /// Total pages, treating an absent value as zero
    pub fn total_pages_or_zero(&self) -> u32 {
        self.total_pages.unwrap_or(0)
    }
}

// ============================================================================
// Cache Key
// ============================================================================

/// Composite cache key: logical resource tag plus page index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub resource: String,
    pub page: PageIndex,
}

impl PageKey {
    /// Create a new key
    pub fn new(resource: impl Into<String>, page: PageIndex) -> Self {
        Self {
            resource: resource.into(),
            page,
        }
    }

    /// Key for the following page of the same resource
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            page: self.page.saturating_add(1),
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.resource, self.page)
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
