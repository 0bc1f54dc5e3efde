//! User-visible notices
//!
//! Ingest and ask report every outcome as a [`Notice`]. The presentation
//! layer decides how each [`NoticeKind`] is rendered (colour, CSS class).

use serde::{Deserialize, Serialize};

/// Fixed notice texts shown to the user
pub mod messages {
    pub const MISSING_URL: &str = "Please enter a URL first.";
    pub const MISSING_QUESTION: &str = "Please enter a question.";
    pub const NO_DOCUMENT: &str = "Please load a webpage first before asking questions.";
    pub const SCRAPE_FAILED: &str =
        "Failed to load webpage content. Please check the URL and try again.";
    pub const CONTENT_LOADED: &str = "Webpage content loaded successfully!";
    pub const CONTENT_STORED: &str = "Content stored in vector database!";
    pub const LOADING_CONTENT: &str = "Loading webpage content...";
    pub const GENERATING_ANSWER: &str = "Generating answer...";
}

/// Kind of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// The step completed
    Success,
    /// Missing input or an unmet precondition; nothing was attempted
    Warning,
    /// The scraper produced no content
    Error,
    /// A collaborator failed; the operation was abandoned
    Fault,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
            NoticeKind::Fault => "fault",
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message shown to the user after a step (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Fault, message)
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
