//! The document currently loaded in a session

use crate::core::source_url::SourceUrl;
use serde::{Deserialize, Serialize};

/// Text scraped from a webpage, as held by a session (Entity)
///
/// A session holds at most one of these; a successful ingest replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedDocument {
    pub url: SourceUrl,
    pub text: String,
}

impl LoadedDocument {
    pub fn new(url: SourceUrl, text: impl Into<String>) -> Self {
        Self {
            url,
            text: text.into(),
        }
    }

    /// Size of the extracted text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
