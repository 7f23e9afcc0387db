//! HTTP client module
//!
//! Provides a thin HTTP client over reqwest.
//!
//! # Features
//!
//! - **Single attempt**: no retries, no backoff; failures surface immediately
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//! - **Defaults**: timeout and user agent

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
