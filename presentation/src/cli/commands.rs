//! CLI command definitions

use clap::{Parser, ValueEnum};
use pagerag_domain::OutputFormat as DomainOutputFormat;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Output format for one-shot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Notices and answer as styled text
    Text,
    /// A single JSON object
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => DomainOutputFormat::Text,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// How the binary should run, derived from the flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Print configuration sources and exit
    ShowConfig,
    /// Serve the web form
    Serve,
    /// Interactive REPL, optionally preloading a URL
    Chat,
    /// Load `url` (if any), answer `question` (if any), exit
    OneShot,
}

/// CLI arguments for page-rag
#[derive(Parser, Debug)]
#[command(name = "page-rag")]
#[command(author, version, about = "Ask questions about a webpage (retrieval-augmented generation)")]
#[command(long_about = r#"
page-rag loads a webpage, stores its text in a local vector store, and
answers questions about it with a language model.

Without --url or a question it starts an interactive session.

Configuration files are loaded from (in priority order):
1. PAGERAG_* environment variables (e.g. PAGERAG_STORAGE__TOP_K=6)
2. --config <path>     Explicit config file
3. ./pagerag.toml      Project-level config
4. ~/.config/page-rag/config.toml   Global config

Example:
  page-rag --url https://example.com "What is the main topic?"
  page-rag --url https://example.com --show-content
  page-rag --chat
  page-rag --serve --bind 127.0.0.1:8501
"#)]
pub struct Cli {
    /// Question to ask about the loaded page
    pub question: Option<String>,

    /// Webpage to load before asking
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Start an interactive session (after loading --url, if given)
    #[arg(short, long)]
    pub chat: bool,

    /// Serve the web form instead of running in the terminal
    #[arg(long, conflicts_with_all = ["chat", "question"])]
    pub serve: bool,

    /// Address for --serve (overrides [server] bind)
    #[arg(long, value_name = "ADDR", requires = "serve")]
    pub bind: Option<SocketAddr>,

    /// Output format for one-shot runs (default: [output] format, else text)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print the loaded page text
    #[arg(long)]
    pub show_content: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn run_mode(&self) -> RunMode {
        if self.show_config {
            RunMode::ShowConfig
        } else if self.serve {
            RunMode::Serve
        } else if self.chat || (self.url.is_none() && self.question.is_none()) {
            RunMode::Chat
        } else {
            RunMode::OneShot
        }
    }
}
