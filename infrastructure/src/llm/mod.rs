//! Chat language model adapters
//!
//! [`ChatClient`] is the seam between the retrieval chain and the model
//! provider. [`OpenAiChatClient`] talks to any OpenAI-compatible
//! `/v1/chat/completions` endpoint.

mod openai;

pub use openai::OpenAiChatClient;

use async_trait::async_trait;
use pagerag_application::ChainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a chat completion request
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authentication failed ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response contained no message")]
    EmptyResponse,
}

impl From<LlmError> for ChainError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Authentication { .. } => ChainError::Authentication(e.to_string()),
            LlmError::EmptyResponse => ChainError::EmptyResponse,
            other => ChainError::RequestFailed(other.to_string()),
        }
    }
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Sends a conversation to a chat model and returns the reply text
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Build `{base_url}/v1/{path}`, accepting base URLs with or without `/v1`
pub(crate) fn openai_endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{}/v1/{}", base, path.trim_start_matches('/'))
}
