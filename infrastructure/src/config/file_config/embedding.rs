//! Embedding configuration from TOML (`[embedding]` section)

use crate::embedding::EmbeddingProvider;
use pagerag_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw embedding configuration from TOML
///
/// # Example
///
/// ```toml
/// [embedding]
/// provider = "openai"                  # "openai" or "hashing"
/// model = "text-embedding-3-small"     # openai only
/// dimensions = 256                     # hashing only
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
}

impl Default for FileEmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 256,
        }
    }
}

impl FileEmbeddingConfig {
    /// Parse provider string into [`EmbeddingProvider`], returning warnings on failure.
    pub fn parse_provider(&self) -> (EmbeddingProvider, Vec<ConfigIssue>) {
        match self.provider.parse::<EmbeddingProvider>() {
            Ok(provider) => (provider, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "embedding.provider".to_string(),
                        value: self.provider.clone(),
                        valid_values: vec!["openai".to_string(), "hashing".to_string()],
                    },
                    message: format!(
                        "embedding.provider: unknown value '{}', falling back to 'openai'",
                        self.provider
                    ),
                };
                (EmbeddingProvider::default(), vec![issue])
            }
        }
    }

    /// Hashing dimensions, clamped to at least one
    pub fn parse_dimensions(&self) -> (usize, Vec<ConfigIssue>) {
        if self.dimensions > 0 {
            return (self.dimensions, vec![]);
        }
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: "embedding.dimensions".to_string(),
            },
            message: "embedding.dimensions: must be at least 1, using 256".to_string(),
        };
        (256, vec![issue])
    }
}
