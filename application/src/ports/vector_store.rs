//! Vector store port
//!
//! Defines the interface of the persistent passage index that a session
//! writes ingested webpages into and that RAG chains retrieve from.

use async_trait::async_trait;
use pagerag_domain::{PassageMetadata, ScoredPassage};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during vector store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open vector store at {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Read failed: {0}")]
    Read(String),

    #[error("Got {texts} texts but {metadatas} metadata entries")]
    LengthMismatch { texts: usize, metadatas: usize },
}

/// A persistent index of passages supporting similarity search.
///
/// Implementations own their persistence format and eviction policy.
/// A handle may be shared by several chains, so every method takes `&self`.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Append one passage per `(text, metadata)` pair.
    ///
    /// `texts` and `metadatas` must have the same length. Nothing is
    /// deduplicated: adding the same text twice stores it twice.
    async fn add_texts(
        &self,
        texts: &[String],
        metadatas: &[PassageMetadata],
    ) -> Result<(), StoreError>;

    /// Return up to `k` passages ranked by similarity to `query`.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredPassage>, StoreError>;

    /// Number of passages visible through this handle
    async fn len(&self) -> Result<usize, StoreError>;
}
