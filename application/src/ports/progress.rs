//! Progress notification port
//!
//! Defines the interface for reporting progress during ingest and ask.

use pagerag_domain::{Notice, messages};

/// A long-running step of a session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStep {
    /// Fetching and extracting the webpage
    LoadingContent,
    /// Writing the extracted text to the vector store
    StoringContent,
    /// Running the RAG chain
    GeneratingAnswer,
}

impl SessionStep {
    /// Spinner text for the step
    pub fn message(&self) -> &'static str {
        match self {
            SessionStep::LoadingContent => messages::LOADING_CONTENT,
            SessionStep::StoringContent => "Storing content in vector database...",
            SessionStep::GeneratingAnswer => messages::GENERATING_ANSWER,
        }
    }
}

/// Callback for progress updates during session operations
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, log lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a step starts
    fn on_step_start(&self, step: SessionStep);

    /// Called when a step finishes, successfully or not
    fn on_step_complete(&self, step: SessionStep, success: bool);

    /// Called for each intermediate notice, in the order they occur.
    ///
    /// Final warnings and errors are carried by the returned error instead.
    fn on_notice(&self, _notice: &Notice) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_step_start(&self, _step: SessionStep) {}
    fn on_step_complete(&self, _step: SessionStep, _success: bool) {}
}
