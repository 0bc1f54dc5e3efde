//! Session configuration from TOML (`[session]` section)

use pagerag_domain::{AskPrecondition, ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
///
/// # Example
///
/// ```toml
/// [session]
/// ask_precondition = "session_document"   # "session_document", "store_not_empty", "none"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub ask_precondition: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            ask_precondition: AskPrecondition::default().as_str().to_string(),
        }
    }
}

impl FileSessionConfig {
    /// Parse ask_precondition into [`AskPrecondition`], returning warnings on failure.
    pub fn parse_ask_precondition(&self) -> (AskPrecondition, Vec<ConfigIssue>) {
        match self.ask_precondition.parse::<AskPrecondition>() {
            Ok(policy) => (policy, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "session.ask_precondition".to_string(),
                        value: self.ask_precondition.clone(),
                        valid_values: vec![
                            "session_document".to_string(),
                            "store_not_empty".to_string(),
                            "none".to_string(),
                        ],
                    },
                    message: format!(
                        "session.ask_precondition: unknown value '{}', falling back to 'session_document'",
                        self.ask_precondition
                    ),
                };
                (AskPrecondition::default(), vec![issue])
            }
        }
    }
}
