//! Application layer for page-rag
//!
//! This crate contains the session use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    content_scraper::ContentScraper,
    progress::{NoProgress, ProgressNotifier, SessionStep},
    rag_chain::{ChainError, RagChain},
    session_backend::SessionBackend,
    vector_store::{StoreError, VectorStore},
};
pub use use_cases::session::{
    AskError, AskOutput, CollaboratorFault, FailureKind, IngestError, IngestOutput, InitState,
    SessionController,
};
