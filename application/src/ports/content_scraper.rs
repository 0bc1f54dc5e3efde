//! Content scraper port
//!
//! Defines how the application obtains plain text for a webpage URL.

use async_trait::async_trait;

/// Fetches a webpage and extracts its plain-text content.
///
/// Any failure (network error, HTTP error status, unparsable body, no
/// readable text) is reported as `None`. Callers cannot and need not
/// distinguish the cause; adapters log it.
#[async_trait]
pub trait ContentScraper: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}
