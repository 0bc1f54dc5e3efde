//! Input/output types for session operations.

use pagerag_domain::{Notice, Question, SourceUrl};

/// Where a session is in its lazy initialization
///
/// `Uninitialized → StoreReady → ChainReady`. The store is opened first and
/// the chain is bound to it immediately after, so `StoreReady` is only
/// observable while initialization is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitState {
    Uninitialized,
    StoreReady,
    ChainReady,
}

/// Result of a successful ingest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutput {
    /// The URL that was loaded
    pub url: SourceUrl,
    /// Size of the extracted text in bytes
    pub bytes: usize,
    /// Success notices, in the order they occurred
    pub notices: Vec<Notice>,
}

/// Result of a successful ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOutput {
    pub question: Question,
    /// The chain's answer, unmodified
    pub answer: String,
}
