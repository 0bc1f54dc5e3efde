//! Retrieval QA chain: top-k retrieval, one "stuff" prompt, one completion

use crate::llm::{ChatClient, ChatMessage};
use async_trait::async_trait;
use pagerag_application::{ChainError, RagChain, VectorStore};
use pagerag_domain::RagPromptTemplate;
use std::sync::Arc;
use tracing::debug;

/// Answers a question from the `top_k` most similar stored passages
pub struct RetrievalQaChain {
    store: Arc<dyn VectorStore>,
    client: Arc<dyn ChatClient>,
    top_k: usize,
}

impl RetrievalQaChain {
    pub fn new(store: Arc<dyn VectorStore>, client: Arc<dyn ChatClient>, top_k: usize) -> Self {
        Self {
            store,
            client,
            top_k: top_k.max(1),
        }
    }
}

#[async_trait]
impl RagChain for RetrievalQaChain {
    async fn query(&self, question: &str) -> Result<String, ChainError> {
        let passages = self.store.similarity_search(question, self.top_k).await?;
        debug!(
            "Retrieved {} passages (best score {:?})",
            passages.len(),
            passages.first().map(|p| p.score)
        );

        let messages = [
            ChatMessage::system(RagPromptTemplate::system()),
            ChatMessage::user(RagPromptTemplate::question_prompt(question, &passages)),
        ];

        Ok(self.client.complete(&messages).await?)
    }
}
