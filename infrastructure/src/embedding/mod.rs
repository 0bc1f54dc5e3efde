//! Text embedding adapters
//!
//! The JSONL vector store turns text into vectors through an [`Embedder`].
//! Two implementations are provided:
//!
//! - [`OpenAiEmbedder`]: `POST {base_url}/v1/embeddings`
//! - [`HashingEmbedder`]: deterministic feature hashing, no network access

mod hashing;
mod openai;

pub use hashing::HashingEmbedder;
pub use openai::OpenAiEmbedder;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while embedding text
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("embedding API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

/// Turns texts into fixed-length vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed each text; the result has one vector per input, in order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Identifier recorded alongside stored vectors
    fn model_id(&self) -> &str;
}

/// Which embedder the default backend builds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[default]
    OpenAi,
    Hashing,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "open_ai" => Ok(EmbeddingProvider::OpenAi),
            "hashing" | "hash" | "local" => Ok(EmbeddingProvider::Hashing),
            other => Err(format!("unknown embedding provider: {}", other)),
        }
    }
}

/// Cosine similarity of two vectors (0.0 when either is zero or lengths differ)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
