//! Use cases (application services)
//!
//! - [`session`] — the per-session ingest/ask controller

pub mod session;
