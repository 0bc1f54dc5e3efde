//! Prompt templates for answering questions over retrieved passages.

mod template;

pub use template::RagPromptTemplate;
