//! Configuration file loading for page-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `PAGERAG_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./pagerag.toml` or `./.pagerag.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/page-rag/config.toml`
//!    (fallback `~/.config/page-rag/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEmbeddingConfig, FileLlmConfig, FileLoggingConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig, FileReplConfig,
    FileScraperConfig, FileServerConfig, FileSessionConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
