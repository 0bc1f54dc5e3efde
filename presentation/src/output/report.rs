//! Machine-readable summary of a one-shot run

use pagerag_application::{AskError, AskOutput, IngestError, IngestOutput};
use pagerag_domain::{LoadedDocument, Notice};
use serde::Serialize;

/// Everything a one-shot run produced, serialized for `--output json`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OneShotReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Every notice, in the order it was shown
    pub notices: Vec<Notice>,
    /// Kind of the failure that ended the run, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
}

impl OneShotReport {
    pub fn record_ingest(&mut self, url: &str, result: &Result<IngestOutput, IngestError>) {
        self.url = Some(url.to_string());
        match result {
            Ok(output) => {
                self.bytes = Some(output.bytes);
                self.notices.extend(output.notices.iter().cloned());
            }
            Err(e) => self.record_failure(e.notice(), e.kind().as_str()),
        }
    }

    pub fn record_ask(&mut self, question: &str, result: &Result<AskOutput, AskError>) {
        self.question = Some(question.to_string());
        match result {
            Ok(output) => self.answer = Some(output.answer.clone()),
            Err(e) => self.record_failure(e.notice(), e.kind().as_str()),
        }
    }

    pub fn record_content(&mut self, document: Option<&LoadedDocument>) {
        self.content = document.map(|d| d.text.clone());
    }

    fn record_failure(&mut self, notice: Notice, kind: &'static str) {
        self.notices.push(notice);
        self.failure = Some(kind);
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
