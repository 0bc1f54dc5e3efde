//! Domain layer for page-rag
//!
//! This crate contains the core concepts, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Documents and Passages
//!
//! - **LoadedDocument**: the webpage most recently ingested in a session
//!   (its URL and extracted text)
//! - **Passage**: one unit of stored text plus metadata, as appended to the
//!   vector store. Metadata always carries a `source` entry.
//!
//! ## Notices
//!
//! Every user-visible outcome of an ingest or ask is a [`Notice`] of one of
//! four kinds: success, warning, error, or fault.

pub mod config;
pub mod core;
pub mod document;
pub mod notice;
pub mod prompt;

// Re-export commonly used types
pub use config::{AskPrecondition, ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError, question::Question, source_url::SourceUrl, string::{preview, truncate},
};
pub use document::{
    loaded::LoadedDocument,
    passage::{Passage, PassageMetadata, ScoredPassage, SOURCE_KEY},
};
pub use notice::{Notice, NoticeKind, messages};
pub use prompt::RagPromptTemplate;
