//! Error types for session operations.
//!
//! Every failure maps onto one [`FailureKind`]. Only
//! [`FailureKind::CollaboratorFault`] wraps a cause; the other kinds are
//! anticipated user-input or precondition problems.

use crate::ports::rag_chain::ChainError;
use crate::ports::vector_store::StoreError;
use pagerag_domain::{Notice, SourceUrl, messages};
use thiserror::Error;

/// Failure taxonomy shared by ingest and ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Empty URL or question; nothing was attempted
    MissingInput,
    /// The scraper returned no content; state unchanged
    ScrapeFailed,
    /// Ask attempted before anything was loaded; chain not invoked
    PreconditionUnmet,
    /// A collaborator raised an error; the operation was abandoned
    CollaboratorFault,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingInput => "missing_input",
            FailureKind::ScrapeFailed => "scrape_failed",
            FailureKind::PreconditionUnmet => "precondition_unmet",
            FailureKind::CollaboratorFault => "collaborator_fault",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store or chain failure, with its cause preserved
#[derive(Error, Debug)]
pub enum CollaboratorFault {
    #[error("vector store: {0}")]
    Store(#[from] StoreError),

    #[error("RAG chain: {0}")]
    Chain(#[from] ChainError),
}

/// Errors that can occur during ingest
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{}", messages::MISSING_URL)]
    MissingInput,

    #[error("{} ({url})", messages::SCRAPE_FAILED)]
    ScrapeFailed { url: SourceUrl },

    #[error("Ingest aborted: {0}")]
    CollaboratorFault(#[from] CollaboratorFault),
}

impl IngestError {
    pub fn kind(&self) -> FailureKind {
        match self {
            IngestError::MissingInput => FailureKind::MissingInput,
            IngestError::ScrapeFailed { .. } => FailureKind::ScrapeFailed,
            IngestError::CollaboratorFault(_) => FailureKind::CollaboratorFault,
        }
    }

    /// The notice to show for this failure
    pub fn notice(&self) -> Notice {
        match self {
            IngestError::MissingInput => Notice::warning(messages::MISSING_URL),
            IngestError::ScrapeFailed { .. } => Notice::error(messages::SCRAPE_FAILED),
            IngestError::CollaboratorFault(fault) => {
                Notice::fault(format!("Failed to store webpage content: {}", fault))
            }
        }
    }
}

impl From<StoreError> for IngestError {
    fn from(e: StoreError) -> Self {
        IngestError::CollaboratorFault(e.into())
    }
}

/// Errors that can occur during ask
#[derive(Error, Debug)]
pub enum AskError {
    #[error("{}", messages::MISSING_QUESTION)]
    MissingInput,

    #[error("{}", messages::NO_DOCUMENT)]
    PreconditionUnmet,

    #[error("Ask aborted: {0}")]
    CollaboratorFault(#[from] CollaboratorFault),
}

impl AskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AskError::MissingInput => FailureKind::MissingInput,
            AskError::PreconditionUnmet => FailureKind::PreconditionUnmet,
            AskError::CollaboratorFault(_) => FailureKind::CollaboratorFault,
        }
    }

    /// The notice to show for this failure
    pub fn notice(&self) -> Notice {
        match self {
            AskError::MissingInput => Notice::warning(messages::MISSING_QUESTION),
            AskError::PreconditionUnmet => Notice::warning(messages::NO_DOCUMENT),
            AskError::CollaboratorFault(fault) => {
                Notice::fault(format!("Failed to generate an answer: {}", fault))
            }
        }
    }
}

impl From<StoreError> for AskError {
    fn from(e: StoreError) -> Self {
        AskError::CollaboratorFault(e.into())
    }
}

impl From<ChainError> for AskError {
    fn from(e: ChainError) -> Self {
        AskError::CollaboratorFault(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerag_domain::NoticeKind;
    use std::error::Error as _;

    #[test]
    fn test_ingest_notices_by_kind() {
        assert_eq!(
            IngestError::MissingInput.notice(),
            Notice::warning("Please enter a URL first.")
        );
        let scrape = IngestError::ScrapeFailed {
            url: SourceUrl::try_new("https://example.com").unwrap(),
        };
        assert_eq!(scrape.kind(), FailureKind::ScrapeFailed);
        assert_eq!(scrape.notice().kind, NoticeKind::Error);
    }

    #[test]
    fn test_ask_notices_by_kind() {
        assert_eq!(
            AskError::PreconditionUnmet.notice(),
            Notice::warning("Please load a webpage first before asking questions.")
        );
        assert_eq!(
            AskError::MissingInput.notice(),
            Notice::warning("Please enter a question.")
        );
    }

    #[test]
    fn test_fault_preserves_cause() {
        let err: AskError = ChainError::RequestFailed("503 Service Unavailable".to_string()).into();
        assert_eq!(err.kind(), FailureKind::CollaboratorFault);
        assert_eq!(err.notice().kind, NoticeKind::Fault);

        let source = err.source().expect("fault should carry a source");
        assert!(source.to_string().contains("503 Service Unavailable"));
    }

    #[test]
    fn test_store_error_converts_to_ingest_fault() {
        let err: IngestError = StoreError::Write("disk full".to_string()).into();
        assert_eq!(err.kind(), FailureKind::CollaboratorFault);
        assert!(err.notice().message.contains("disk full"));
    }
}
