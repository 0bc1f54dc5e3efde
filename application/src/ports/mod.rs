//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_scraper;
pub mod progress;
pub mod rag_chain;
pub mod session_backend;
pub mod vector_store;
