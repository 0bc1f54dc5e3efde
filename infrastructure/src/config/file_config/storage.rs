//! Storage configuration from TOML (`[storage]` section)

use pagerag_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw vector store configuration from TOML
///
/// # Example
///
/// ```toml
/// [storage]
/// persist_directory = "./chroma_db"
/// top_k = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding `passages.jsonl`
    pub persist_directory: String,
    /// Passages retrieved per question
    pub top_k: usize,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            persist_directory: "./chroma_db".to_string(),
            top_k: 4,
        }
    }
}

impl FileStorageConfig {
    /// `top_k`, clamped to at least one passage
    pub fn parse_top_k(&self) -> (usize, Vec<ConfigIssue>) {
        if self.top_k > 0 {
            return (self.top_k, vec![]);
        }
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: "storage.top_k".to_string(),
            },
            message: "storage.top_k: must be at least 1, using 1".to_string(),
        };
        (1, vec![issue])
    }
}
