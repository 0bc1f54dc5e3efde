//! Default session backend: JSONL store + retrieval QA chain

use crate::config::FileConfig;
use crate::embedding::{Embedder, EmbeddingProvider, HashingEmbedder, OpenAiEmbedder};
use crate::llm::{ChatClient, OpenAiChatClient};
use crate::rag::RetrievalQaChain;
use crate::vector_store::JsonlVectorStore;
use async_trait::async_trait;
use pagerag_application::{RagChain, SessionBackend, StoreError, VectorStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Builds [`JsonlVectorStore`] handles and [`RetrievalQaChain`]s over them
///
/// One backend is shared by every session. Sessions opening the same
/// persist directory get the same store handle, so the passage log is held
/// in memory once per directory.
pub struct DefaultSessionBackend {
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatClient>,
    top_k: usize,
    stores: Mutex<HashMap<PathBuf, Arc<JsonlVectorStore>>>,
}

impl DefaultSessionBackend {
    pub fn new(embedder: Arc<dyn Embedder>, chat: Arc<dyn ChatClient>, top_k: usize) -> Self {
        Self {
            embedder,
            chat,
            top_k,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Build the embedder and chat client described by `config`
    ///
    /// A missing API key is not an error here: requests are sent without
    /// credentials and the provider's rejection surfaces as a fault.
    pub fn from_config(config: &FileConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        let openai = &config.providers.openai;
        let api_key = openai.resolve_api_key();

        let embedder: Arc<dyn Embedder> = match config.embedding.parse_provider().0 {
            EmbeddingProvider::OpenAi => Arc::new(OpenAiEmbedder::new(
                client.clone(),
                &openai.base_url,
                api_key.clone(),
                config.embedding.model.clone(),
            )),
            EmbeddingProvider::Hashing => {
                Arc::new(HashingEmbedder::new(config.embedding.parse_dimensions().0))
            }
        };

        let chat = OpenAiChatClient::new(client, &openai.base_url, api_key, config.llm.model.clone())
            .with_temperature(config.llm.parse_temperature().0)
            .with_max_tokens(config.llm.max_tokens);
        info!(
            "Backend: embedder {}, chat model {}, top_k {}",
            embedder.model_id(),
            chat.model(),
            config.storage.parse_top_k().0
        );

        Ok(Self::new(
            embedder,
            Arc::new(chat),
            config.storage.parse_top_k().0,
        ))
    }
}

#[async_trait]
impl SessionBackend for DefaultSessionBackend {
    async fn open_store(
        &self,
        persist_directory: &Path,
    ) -> Result<Arc<dyn VectorStore>, StoreError> {
        let key = std::fs::canonicalize(persist_directory)
            .unwrap_or_else(|_| persist_directory.to_path_buf());
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| StoreError::Read("store registry lock poisoned".to_string()))?;

        if let Some(store) = stores.get(&key) {
            debug!("Reusing vector store handle for {}", key.display());
            return Ok(Arc::clone(store) as Arc<dyn VectorStore>);
        }

        let store = Arc::new(JsonlVectorStore::open(
            persist_directory,
            Arc::clone(&self.embedder),
        )?);
        // The directory exists now; key it the way later lookups will
        let key = std::fs::canonicalize(persist_directory).unwrap_or(key);
        stores.insert(key, Arc::clone(&store));
        Ok(store as Arc<dyn VectorStore>)
    }

    fn bind_chain(&self, store: Arc<dyn VectorStore>) -> Arc<dyn RagChain> {
        Arc::new(RetrievalQaChain::new(
            store,
            Arc::clone(&self.chat),
            self.top_k,
        ))
    }
}
