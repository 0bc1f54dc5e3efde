//! Prompt templates for retrieval-augmented answers

use crate::document::passage::ScoredPassage;

/// Templates for the "stuff" RAG prompt: every retrieved passage is placed
/// into a single user message together with the question.
pub struct RagPromptTemplate;

impl RagPromptTemplate {
    /// System prompt for answering from webpage context
    pub fn system() -> &'static str {
        r#"You are a helpful assistant that answers questions about webpage content.
Use only the provided context to answer. If the context does not contain the answer,
say that you don't know rather than making something up.
Keep answers concise and cite the source URL when it helps the reader."#
    }

    /// User prompt containing the retrieved context and the question
    pub fn question_prompt(question: &str, passages: &[ScoredPassage]) -> String {
        if passages.is_empty() {
            return Self::no_context_prompt(question);
        }

        let mut prompt = String::from("Context:\n");
        for (i, scored) in passages.iter().enumerate() {
            let source = scored.passage.source().unwrap_or("unknown");
            prompt.push_str(&format!(
                "\n--- Passage {} (source: {}) ---\n{}\n",
                i + 1,
                source,
                scored.passage.text
            ));
        }

        prompt.push_str(&format!("\nQuestion: {}\n\nAnswer:", question));
        prompt
    }

    /// User prompt when the store returned nothing
    pub fn no_context_prompt(question: &str) -> String {
        format!(
            r#"No webpage context is available.

Question: {}

Explain that no loaded content covers this question."#,
            question
        )
    }
}
