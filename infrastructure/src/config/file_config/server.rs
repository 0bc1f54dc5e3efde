//! Web server and logging configuration (`[server]`, `[logging]` sections)

use super::ConfigValidationError;
use pagerag_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Raw web server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address the web form listens on
    pub bind: String,
    /// Browser sessions held at once; the least recently used is dropped
    pub max_sessions: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            max_sessions: 256,
        }
    }
}

impl FileServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        self.bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigValidationError::InvalidBindAddress {
                value: self.bind.clone(),
                reason: e.to_string(),
            })
    }

    /// An unparsable `bind` is fatal: the server has nowhere to listen
    pub fn validate_bind(&self) -> Vec<ConfigIssue> {
        match self.socket_addr() {
            Ok(_) => vec![],
            Err(e) => vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidAddress {
                    field: "server.bind".to_string(),
                    value: self.bind.clone(),
                },
                message: e.to_string(),
            }],
        }
    }

    /// `max_sessions`, clamped to at least one session
    pub fn parse_max_sessions(&self) -> (usize, Vec<ConfigIssue>) {
        if self.max_sessions > 0 {
            return (self.max_sessions, vec![]);
        }
        let issue = ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::OutOfRange {
                field: "server.max_sessions".to_string(),
            },
            message: "server.max_sessions: must be at least 1, using 1".to_string(),
        };
        (1, vec![issue])
    }
}

/// Raw logging configuration from TOML
///
/// When `directory` is set, logs are also written to a daily rolling file
/// `page-rag.log.<date>` in that directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub directory: Option<String>,
}
