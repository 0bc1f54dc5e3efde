//! Application-level configuration.
//!
//! - [`SessionConfig`] — where a session's store lives and when questions
//!   may be forwarded to the chain

pub mod session_config;

pub use session_config::SessionConfig;
