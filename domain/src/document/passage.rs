//! Passage entity and metadata

use crate::core::source_url::SourceUrl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key naming the URL a passage was scraped from
pub const SOURCE_KEY: &str = "source";

/// String-to-string metadata attached to a passage
///
/// Serialized as a plain JSON object. Keys are kept sorted so that stored
/// records are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassageMetadata(BTreeMap<String, String>);

impl PassageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for a passage scraped from `url`: `{source: url}`
    pub fn for_source(url: &SourceUrl) -> Self {
        Self::new().with(SOURCE_KEY, url.as_str())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `source` entry, if present
    pub fn source(&self) -> Option<&str> {
        self.get(SOURCE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A unit of stored text plus its metadata (Entity)
///
/// Passages are created once on a successful scrape and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub metadata: PassageMetadata,
}

impl Passage {
    pub fn new(text: impl Into<String>, metadata: PassageMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.source()
    }
}

/// A passage returned from a similarity search, with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassage {
    pub passage: Passage,
    /// Cosine similarity against the query (higher is closer)
    pub score: f32,
}
