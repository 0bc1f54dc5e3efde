//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Unknown ask precondition: {0}")]
    UnknownAskPrecondition(String),
}
