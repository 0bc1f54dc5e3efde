//! Ask precondition policy

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// What must hold before a question is forwarded to the RAG chain
///
/// | Policy | Checks |
/// |--------|--------|
/// | `SessionDocument` | a webpage was loaded in *this* session (default) |
/// | `StoreNotEmpty` | the vector store holds at least one passage |
/// | `None` | nothing; every question is forwarded |
///
/// `SessionDocument` ignores the store's contents: a store
/// populated by an earlier session cannot be queried until something is
/// loaded again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AskPrecondition {
    #[default]
    SessionDocument,
    StoreNotEmpty,
    None,
}

impl AskPrecondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AskPrecondition::SessionDocument => "session_document",
            AskPrecondition::StoreNotEmpty => "store_not_empty",
            AskPrecondition::None => "none",
        }
    }
}

impl std::fmt::Display for AskPrecondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AskPrecondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "session_document" | "session" => Ok(AskPrecondition::SessionDocument),
            "store_not_empty" | "store" => Ok(AskPrecondition::StoreNotEmpty),
            "none" | "off" => Ok(AskPrecondition::None),
            other => Err(DomainError::UnknownAskPrecondition(other.to_string())),
        }
    }
}
