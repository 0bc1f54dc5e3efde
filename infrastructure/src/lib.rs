//! Infrastructure layer for page-rag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading:
//!
//! - [`HttpContentScraper`]: webpage fetch and HTML text extraction
//! - [`JsonlVectorStore`]: append-only passage log with cosine search
//! - [`RetrievalQaChain`]: top-k retrieval and one chat completion
//! - [`DefaultSessionBackend`]: wires the store and chain for each session

pub mod backend;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod rag;
pub mod scraper;
pub mod vector_store;

// Re-export commonly used types
pub use backend::DefaultSessionBackend;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use embedding::{EmbedError, Embedder, EmbeddingProvider, HashingEmbedder, OpenAiEmbedder};
pub use llm::{ChatClient, ChatMessage, LlmError, OpenAiChatClient};
pub use rag::RetrievalQaChain;
pub use scraper::{HttpContentScraper, ScrapeError};
pub use vector_store::JsonlVectorStore;
