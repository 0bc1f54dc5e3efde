//! Persistent vector store adapters

mod jsonl;

pub use jsonl::{JsonlVectorStore, STORE_FILE_NAME};
