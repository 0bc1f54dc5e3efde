//! Documents and stored passages.
//!
//! - [`loaded::LoadedDocument`] — the document currently loaded in a session
//! - [`passage::Passage`] — a unit of stored text plus metadata

pub mod loaded;
pub mod passage;
