//! HTTP content scraper

use super::html::html_to_text;
use crate::config::FileScraperConfig;
use async_trait::async_trait;
use pagerag_application::ContentScraper;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Reasons a scrape produced no content
///
/// These never cross the port boundary; [`ContentScraper::fetch`] logs them
/// and returns `None`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("response too large: {0} bytes (max: {max} bytes)", max = MAX_BODY_SIZE)]
    TooLarge(u64),

    #[error("no readable text in response")]
    Empty,
}

/// Fetches webpages over HTTP(S) and extracts their text
pub struct HttpContentScraper {
    client: reqwest::Client,
    max_text_bytes: usize,
}

impl HttpContentScraper {
    pub fn new(config: &FileScraperConfig) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_text_bytes: config.max_text_bytes,
        })
    }

    /// Fetch `url` and extract its text, reporting why nothing was produced
    pub async fn scrape(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { status });
        }

        if let Some(length) = response.content_length()
            && length > MAX_BODY_SIZE as u64
        {
            return Err(ScrapeError::TooLarge(length));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.bytes().await?;
        if body.len() > MAX_BODY_SIZE {
            return Err(ScrapeError::TooLarge(body.len() as u64));
        }
        debug!(
            "Fetched {} ({} bytes, content-type '{}')",
            url,
            body.len(),
            content_type
        );

        let text = extract_text(&String::from_utf8_lossy(&body), &content_type);
        let text = truncate_bytes(text, self.max_text_bytes);
        if text.trim().is_empty() {
            return Err(ScrapeError::Empty);
        }
        Ok(text)
    }
}

#[async_trait]
impl ContentScraper for HttpContentScraper {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.scrape(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Scraping {} failed: {}", url, e);
                None
            }
        }
    }
}

/// Convert a response body to text based on its content type
///
/// HTML (or an unlabelled body that looks like HTML) is converted with
/// [`html_to_text`]; anything else is returned as-is.
fn extract_text(body: &str, content_type: &str) -> String {
    let is_html = content_type.contains("text/html")
        || content_type.contains("application/xhtml")
        || (content_type.is_empty() && looks_like_html(body));

    if is_html {
        html_to_text(body)
    } else {
        body.trim().to_string()
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let head = &head[..floor_char_boundary(head, 256)];
    let lower = head.to_ascii_lowercase();
    lower.starts_with("<!doctype html") || lower.contains("<html")
}

/// Keep at most `max` bytes of `text` (0 = unlimited), cutting on a char boundary
fn truncate_bytes(mut text: String, max: usize) -> String {
    if max > 0 && text.len() > max {
        let end = floor_char_boundary(&text, max);
        text.truncate(end);
    }
    text
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_by_content_type() {
        let html = "<html><body><p>Hi</p></body></html>";
        assert_eq!(extract_text(html, "text/html; charset=utf-8"), "Hi");
        assert_eq!(extract_text(html, ""), "Hi");
        assert_eq!(extract_text("  plain body \n", "text/plain"), "plain body");
        assert_eq!(extract_text("{\"a\": 1}", "application/json"), "{\"a\": 1}");
    }

    #[test]
    fn test_truncate_bytes_respects_char_boundary() {
        assert_eq!(truncate_bytes("héllo".to_string(), 2), "h");
        assert_eq!(truncate_bytes("héllo".to_string(), 3), "hé");
        assert_eq!(truncate_bytes("hello".to_string(), 0), "hello");
        assert_eq!(truncate_bytes("hello".to_string(), 10), "hello");
    }

    #[test]
    fn test_new_accepts_default_config() {
        assert!(HttpContentScraper::new(&FileScraperConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_returns_none() {
        let config = FileScraperConfig {
            timeout_secs: 2,
            ..Default::default()
        };
        let scraper = HttpContentScraper::new(&config).unwrap();
        // Port 9 (discard) on localhost is closed in test environments
        assert!(scraper.fetch("http://127.0.0.1:9/").await.is_none());
        assert!(scraper.fetch("not a url").await.is_none());
    }
}
