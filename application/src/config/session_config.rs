//! Session parameters — use case behavior control.
//!
//! [`SessionConfig`] groups the static parameters that control a
//! [`SessionController`](crate::SessionController). These are
//! application-layer concerns, not domain policy.

use pagerag_domain::AskPrecondition;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the persistent vector store
pub const DEFAULT_PERSIST_DIRECTORY: &str = "./chroma_db";

/// Session control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory the vector store is opened against.
    pub persist_directory: PathBuf,
    /// What must hold before a question reaches the chain.
    pub ask_precondition: AskPrecondition,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_directory: PathBuf::from(DEFAULT_PERSIST_DIRECTORY),
            ask_precondition: AskPrecondition::default(),
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_persist_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.persist_directory = dir.into();
        self
    }

    pub fn with_ask_precondition(mut self, precondition: AskPrecondition) -> Self {
        self.ask_precondition = precondition;
        self
    }
}
