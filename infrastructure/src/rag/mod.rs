//! RAG chain adapters

mod chain;

pub use chain::RetrievalQaChain;
