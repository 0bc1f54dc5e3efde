//! Core domain concepts shared across all subdomains.
//!
//! - [`source_url::SourceUrl`] — a validated webpage address to ingest
//! - [`question::Question`] — a validated question about loaded content
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod question;
pub mod source_url;
pub mod string;
