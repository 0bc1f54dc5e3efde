//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod embedding;
mod llm;
mod output;
mod providers;
mod repl;
mod scraper;
mod server;
mod session;
mod storage;

pub use embedding::FileEmbeddingConfig;
pub use llm::FileLlmConfig;
pub use output::FileOutputConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use repl::FileReplConfig;
pub use scraper::FileScraperConfig;
pub use server::{FileLoggingConfig, FileServerConfig};
pub use session::FileSessionConfig;
pub use storage::FileStorageConfig;

use crate::embedding::EmbeddingProvider;
use pagerag_application::SessionConfig;
use pagerag_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors that prevent an adapter from being built
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid server.bind '{value}': {reason}")]
    InvalidBindAddress { value: String, reason: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Vector store location and retrieval depth
    pub storage: FileStorageConfig,
    /// Session behavior
    pub session: FileSessionConfig,
    /// Webpage fetching
    pub scraper: FileScraperConfig,
    /// Embedding provider for the vector store
    pub embedding: FileEmbeddingConfig,
    /// Chat model for answers
    pub llm: FileLlmConfig,
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Web form settings
    pub server: FileServerConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures (`session.ask_precondition`, `embedding.provider`)
    /// 2. Numeric ranges (`storage.top_k`, `embedding.dimensions`, `llm.temperature`,
    ///    `server.max_sessions`)
    /// 3. That `server.bind` parses (an error)
    /// 4. That an OpenAI API key can be resolved
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.session.parse_ask_precondition().1);
        let (provider, provider_issues) = self.embedding.parse_provider();
        issues.extend(provider_issues);

        // 2. Range validation
        issues.extend(self.storage.parse_top_k().1);
        if provider == EmbeddingProvider::Hashing {
            issues.extend(self.embedding.parse_dimensions().1);
        }
        issues.extend(self.llm.parse_temperature().1);
        issues.extend(self.server.parse_max_sessions().1);

        // 3. Addresses
        issues.extend(self.server.validate_bind());

        // 4. Credentials (chat completions always go to the OpenAI-compatible API)
        let openai = &self.providers.openai;
        if openai.resolve_api_key().is_none() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::MissingApiKey {
                    provider: "openai".to_string(),
                    env_var: openai.api_key_env.clone(),
                },
                message: format!(
                    "providers.openai: no API key found in ${} or providers.openai.api_key; questions will fail",
                    openai.api_key_env
                ),
            });
        }

        issues
    }

    /// Session parameters for the application layer
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_persist_directory(&self.storage.persist_directory)
            .with_ask_precondition(self.session.parse_ask_precondition().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerag_domain::{AskPrecondition, OutputFormat};
    use std::path::PathBuf;

    fn with_key(mut config: FileConfig) -> FileConfig {
        config.providers.openai.api_key = Some("sk-test".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[storage]
persist_directory = "/var/lib/page-rag"
top_k = 6

[session]
ask_precondition = "store_not_empty"

[embedding]
provider = "hashing"
dimensions = 512

[llm]
model = "gpt-4o-mini"
temperature = 0.2

[providers.openai]
base_url = "http://localhost:11434"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/page-rag/history.txt"

[server]
bind = "0.0.0.0:9000"
max_sessions = 32

[logging]
directory = "/tmp/page-rag-logs"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.persist_directory, "/var/lib/page-rag");
        assert_eq!(config.storage.top_k, 6);
        assert_eq!(config.embedding.dimensions, 512);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.providers.openai.base_url, "http://localhost:11434");
        // Unset keys keep their defaults
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.max_sessions, 32);
        assert_eq!(
            config.logging.directory.as_deref(),
            Some("/tmp/page-rag-logs")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[storage]
top_k = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.top_k, 2);
        // Defaults should apply
        assert_eq!(config.storage.persist_directory, "./chroma_db");
        assert_eq!(config.llm.model, "gpt-4-turbo-preview");
        assert_eq!(config.llm.temperature, 0.0);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.session.ask_precondition, "session_document");
        assert_eq!(config.embedding.provider, "openai");
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.scraper.timeout_secs, 30);
        assert_eq!(config.server.bind, "127.0.0.1:8501");
        assert_eq!(config.server.max_sessions, 256);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = with_key(FileConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.providers.openai.api_key_env = "PAGERAG_TEST_UNSET_KEY_VAR".to_string();
        config.session.ask_precondition = "sometimes".to_string();
        config.storage.top_k = 0;

        let issues = config.validate();

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| !issue.is_error()));
        assert!(issues.iter().any(|issue| matches!(
            issue.code,
            ConfigIssueCode::MissingApiKey { ref env_var, .. } if env_var == "PAGERAG_TEST_UNSET_KEY_VAR"
        )));
    }

    #[test]
    fn test_validate_invalid_bind_is_error() {
        let mut config = with_key(FileConfig::default());
        config.server.bind = "not an address".to_string();

        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidAddress { ref field, .. } if field == "server.bind"
        ));
    }

    #[test]
    fn test_session_config() {
        let mut config = FileConfig::default();
        config.storage.persist_directory = "/data/store".to_string();
        config.session.ask_precondition = "none".to_string();

        let session = config.session_config();

        assert_eq!(session.persist_directory, PathBuf::from("/data/store"));
        assert_eq!(session.ask_precondition, AskPrecondition::None);
    }
}
