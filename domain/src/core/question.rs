//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question about the loaded webpage content (Value Object)
///
/// The content is never empty or whitespace-only. Surrounding whitespace
/// is preserved so the chain receives exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(DomainError::EmptyQuestion)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(DomainError::EmptyQuestion)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What is the main topic?").unwrap();
        assert_eq!(q.content(), "What is the main topic?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\n\t").is_none());
    }

    #[test]
    fn test_try_from_reports_empty_question() {
        let err = Question::try_from("").unwrap_err();
        assert_eq!(err, DomainError::EmptyQuestion);
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let q = Question::try_new("  Summarize  ").unwrap();
        assert_eq!(q.content(), "  Summarize  ");
    }
}
