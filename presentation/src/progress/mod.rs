//! Progress display for ingest and ask

pub mod reporter;

pub use reporter::ProgressReporter;
