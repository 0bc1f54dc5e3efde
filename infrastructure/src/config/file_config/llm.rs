//! Language model configuration from TOML (`[llm]` section)

use pagerag_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw chat model configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Chat completion model name
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens per answer (provider default when unset)
    pub max_tokens: Option<u32>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

impl FileLlmConfig {
    /// Temperature, clamped to the range accepted by the API
    pub fn parse_temperature(&self) -> (f32, Vec<ConfigIssue>) {
        if (0.0..=2.0).contains(&self.temperature) {
            return (self.temperature, vec![]);
        }
        let clamped = if self.temperature.is_nan() {
            0.0
        } else {
            self.temperature.clamp(0.0, 2.0)
        };
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: "llm.temperature".to_string(),
            },
            message: format!(
                "llm.temperature: {} is outside 0.0-2.0, using {}",
                self.temperature, clamped
            ),
        };
        (clamped, vec![issue])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_clamped() {
        let config = FileLlmConfig {
            temperature: 3.5,
            ..Default::default()
        };
        let (temperature, issues) = config.parse_temperature();
        assert_eq!(temperature, 2.0);
        assert_eq!(issues.len(), 1);
        assert!(FileLlmConfig::default().parse_temperature().1.is_empty());
    }
}
