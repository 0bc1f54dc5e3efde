//! Webpage scraping adapter
//!
//! [`HttpContentScraper`] implements the
//! [`ContentScraper`](pagerag_application::ContentScraper) port with a plain
//! HTTP GET and HTML-to-text extraction.

mod html;
mod http;

pub use html::html_to_text;
pub use http::{HttpContentScraper, ScrapeError};
