//! RAG chain port
//!
//! Defines how a question is turned into an answer over stored passages.

use super::vector_store::StoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while answering a question
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] StoreError),

    #[error("Language model request failed: {0}")]
    RequestFailed(String),

    #[error("Language model rejected credentials: {0}")]
    Authentication(String),

    #[error("No response from language model")]
    EmptyResponse,
}

/// Answers questions by retrieving passages and asking a language model.
///
/// A chain is bound to exactly one vector store when it is built
/// (see [`SessionBackend::bind_chain`](super::session_backend::SessionBackend::bind_chain)).
#[async_trait]
pub trait RagChain: Send + Sync {
    async fn query(&self, question: &str) -> Result<String, ChainError>;
}
