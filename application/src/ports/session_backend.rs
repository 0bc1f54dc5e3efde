//! Session backend port
//!
//! Builds the two stateful handles a session owns: the vector store and
//! the RAG chain bound to it.

use super::rag_chain::RagChain;
use super::vector_store::{StoreError, VectorStore};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Factory for per-session collaborator handles.
///
/// [`SessionController`](crate::SessionController) calls each method at most
/// once per session.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Open (or create) the persistent store rooted at `persist_directory`.
    async fn open_store(&self, persist_directory: &Path)
    -> Result<Arc<dyn VectorStore>, StoreError>;

    /// Build a chain that retrieves from `store`.
    fn bind_chain(&self, store: Arc<dyn VectorStore>) -> Arc<dyn RagChain>;
}
