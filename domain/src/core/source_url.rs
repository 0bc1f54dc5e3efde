//! Source URL value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The address of a webpage to ingest (Value Object)
///
/// Only emptiness is checked here. Whether the address is reachable or
/// well-formed is decided by the scraper, which reports any failure as
/// "no content".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Try to create a source URL, returning None for empty input.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn try_new(url: impl AsRef<str>) -> Option<Self> {
        let trimmed = url.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SourceUrl {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        SourceUrl::try_new(s).ok_or(DomainError::EmptyUrl)
    }
}

impl AsRef<str> for SourceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
