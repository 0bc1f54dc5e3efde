//! Interactive chat module
//!
//! Provides a readline-based interactive interface for loading pages and
//! asking questions about them.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
