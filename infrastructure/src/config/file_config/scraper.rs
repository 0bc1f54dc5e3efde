//! Scraper configuration from TOML (`[scraper]` section)

use serde::{Deserialize, Serialize};

/// Raw HTTP scraper configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScraperConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,
    /// Keep at most this many bytes of extracted text (0 = unlimited)
    pub max_text_bytes: usize,
}

impl Default for FileScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("page-rag/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            max_text_bytes: 0,
        }
    }
}
