//! Presentation layer for page-rag
//!
//! This crate contains the CLI definition, output formatters, progress
//! reporters, the interactive chat REPL, and the web form surface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat, RunMode};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use output::report::OneShotReport;
pub use progress::reporter::ProgressReporter;
pub use web::SessionRegistry;
