//! Session use case.
//!
//! A [`SessionController`] owns one user session: the vector store handle,
//! the RAG chain bound to that store, and the document loaded most
//! recently. It sequences the two user-triggered operations:
//!
//! - **Ingest**: scrape a URL, remember its text, append it to the store
//! - **Ask**: forward a question to the chain and return its answer
//!
//! Both handles are created lazily on first use and reused for the rest of
//! the session. Only user-input and precondition problems are handled with
//! friendly notices; every collaborator failure is returned as
//! [`CollaboratorFault`] with its cause, and nothing is retried or rolled back.

mod errors;
mod types;

pub use errors::{AskError, CollaboratorFault, FailureKind, IngestError};
pub use types::{AskOutput, IngestOutput, InitState};

use crate::config::SessionConfig;
use crate::ports::content_scraper::ContentScraper;
use crate::ports::progress::{NoProgress, ProgressNotifier, SessionStep};
use crate::ports::rag_chain::RagChain;
use crate::ports::session_backend::SessionBackend;
use crate::ports::vector_store::{StoreError, VectorStore};
use pagerag_domain::{
    AskPrecondition, LoadedDocument, Notice, PassageMetadata, Question, SourceUrl, messages,
    truncate,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handles created once per session
#[derive(Clone)]
struct SessionHandles {
    store: Arc<dyn VectorStore>,
    chain: Arc<dyn RagChain>,
}

/// Controller for one user session
///
/// Operations take `&mut self`, so at most one ingest or ask runs at a time
/// per session. Surfaces that share a controller across tasks wrap it in an
/// async mutex.
pub struct SessionController<S: ContentScraper + 'static, B: SessionBackend + 'static> {
    scraper: Arc<S>,
    backend: Arc<B>,
    config: SessionConfig,
    handles: Option<SessionHandles>,
    current_document: Option<LoadedDocument>,
}

impl<S: ContentScraper + 'static, B: SessionBackend + 'static> SessionController<S, B> {
    pub fn new(scraper: Arc<S>, backend: Arc<B>) -> Self {
        Self::with_config(scraper, backend, SessionConfig::default())
    }

    pub fn with_config(scraper: Arc<S>, backend: Arc<B>, config: SessionConfig) -> Self {
        Self {
            scraper,
            backend,
            config,
            handles: None,
            current_document: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The document loaded by the last successful ingest, if any
    pub fn current_document(&self) -> Option<&LoadedDocument> {
        self.current_document.as_ref()
    }

    pub fn init_state(&self) -> InitState {
        if self.handles.is_some() {
            InitState::ChainReady
        } else {
            InitState::Uninitialized
        }
    }

    /// Open the store and bind the chain, once.
    ///
    /// Later calls return the existing handles. If opening the store fails
    /// the session stays uninitialized and the next call tries again.
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        self.handles().await.map(|_| ())
    }

    async fn handles(&mut self) -> Result<SessionHandles, StoreError> {
        if let Some(handles) = &self.handles {
            return Ok(handles.clone());
        }

        debug!(
            "Opening vector store at {}",
            self.config.persist_directory.display()
        );
        let store = self
            .backend
            .open_store(&self.config.persist_directory)
            .await?;
        debug!("Session state: {:?}", InitState::StoreReady);

        let chain = self.backend.bind_chain(Arc::clone(&store));
        debug!("Session state: {:?}", InitState::ChainReady);

        let handles = SessionHandles { store, chain };
        self.handles = Some(handles.clone());
        Ok(handles)
    }

    /// Number of passages visible through this session's store
    pub async fn stored_passages(&mut self) -> Result<usize, StoreError> {
        let store = self.handles().await?.store;
        store.len().await
    }

    /// Ingest a webpage with default (no-op) progress
    pub async fn ingest(&mut self, url: &str) -> Result<IngestOutput, IngestError> {
        self.ingest_with_progress(url, &NoProgress).await
    }

    /// Ingest a webpage with progress callbacks
    ///
    /// On success the document becomes the session's current document and
    /// exactly one passage `(text, {source: url})` is appended to the store.
    /// If the store write fails the current document has already been
    /// replaced; no rollback is attempted.
    pub async fn ingest_with_progress(
        &mut self,
        url: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<IngestOutput, IngestError> {
        let url = SourceUrl::try_new(url).ok_or(IngestError::MissingInput)?;

        info!("Loading webpage {}", url);
        progress.on_step_start(SessionStep::LoadingContent);
        let content = self
            .scraper
            .fetch(url.as_str())
            .await
            .filter(|text| !text.trim().is_empty());
        progress.on_step_complete(SessionStep::LoadingContent, content.is_some());

        let Some(text) = content else {
            warn!("No content scraped from {}", url);
            return Err(IngestError::ScrapeFailed { url });
        };

        let store = self.handles().await?.store;

        let bytes = text.len();
        debug!("Scraped {} bytes: {}", bytes, truncate(&text, 80));
        self.current_document = Some(LoadedDocument::new(url.clone(), text.clone()));

        let mut notices = vec![Notice::success(messages::CONTENT_LOADED)];
        progress.on_notice(&notices[0]);

        progress.on_step_start(SessionStep::StoringContent);
        let written = store
            .add_texts(&[text], &[PassageMetadata::for_source(&url)])
            .await;
        progress.on_step_complete(SessionStep::StoringContent, written.is_ok());
        written?;

        let stored = Notice::success(messages::CONTENT_STORED);
        progress.on_notice(&stored);
        notices.push(stored);

        info!("Stored {} bytes from {}", bytes, url);
        Ok(IngestOutput {
            url,
            bytes,
            notices,
        })
    }

    /// Ask a question with default (no-op) progress
    pub async fn ask(&mut self, question: &str) -> Result<AskOutput, AskError> {
        self.ask_with_progress(question, &NoProgress).await
    }

    /// Ask a question with progress callbacks
    ///
    /// The answer is returned exactly as the chain produced it.
    pub async fn ask_with_progress(
        &mut self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<AskOutput, AskError> {
        let question = Question::try_new(question).ok_or(AskError::MissingInput)?;

        self.check_ask_precondition().await?;

        let chain = self.handles().await?.chain;

        info!("Answering question: {}", truncate(question.content(), 100));
        progress.on_step_start(SessionStep::GeneratingAnswer);
        let answer = chain.query(question.content()).await;
        progress.on_step_complete(SessionStep::GeneratingAnswer, answer.is_ok());

        Ok(AskOutput {
            question,
            answer: answer?,
        })
    }

    async fn check_ask_precondition(&mut self) -> Result<(), AskError> {
        let satisfied = match self.config.ask_precondition {
            AskPrecondition::SessionDocument => self.current_document.is_some(),
            AskPrecondition::StoreNotEmpty => self.stored_passages().await? > 0,
            AskPrecondition::None => true,
        };

        if satisfied {
            Ok(())
        } else {
            debug!(
                "Ask precondition '{}' not met",
                self.config.ask_precondition
            );
            Err(AskError::PreconditionUnmet)
        }
    }
}
