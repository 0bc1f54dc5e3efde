//! CLI entrypoint for page-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use pagerag_application::{NoProgress, ProgressNotifier, SessionController};
use pagerag_domain::{OutputFormat, Severity};
use pagerag_infrastructure::{
    ConfigLoader, DefaultSessionBackend, FileConfig, HttpContentScraper,
};
use pagerag_presentation::web;
use pagerag_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OneShotReport, ProgressReporter, ReplConfig, RunMode,
    SessionRegistry,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Session = SessionController<HttpContentScraper, DefaultSessionBackend>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, config.logging.directory.as_deref());

    let mode = cli.run_mode();
    if mode == RunMode::ShowConfig {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration; see the errors above");
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color || format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    info!("Starting page-rag ({:?})", mode);

    // === Dependency Injection ===
    let scraper = Arc::new(HttpContentScraper::new(&config.scraper)?);
    let backend = Arc::new(DefaultSessionBackend::from_config(&config)?);
    let session_config = config.session_config();

    match mode {
        RunMode::Serve => {
            let addr = match cli.bind {
                Some(addr) => addr,
                None => config.server.socket_addr()?,
            };
            let registry = Arc::new(
                SessionRegistry::new(scraper, backend, session_config)
                    .with_max_sessions(config.server.parse_max_sessions().0),
            );
            println!("Serving page-rag on http://{}", addr);
            web::serve(addr, registry).await?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Chat => {
            if cli.question.is_some() {
                warn!("Question argument is ignored in chat mode; ask it at the prompt");
            }
            let session = SessionController::with_config(scraper, backend, session_config);
            let mut repl = ChatRepl::new(session)
                .with_config(repl_config(&config, cli.quiet))
                .with_initial_url(cli.url.clone());
            repl.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::OneShot => {
            let mut session = SessionController::with_config(scraper, backend, session_config);
            let report = run_one_shot(&cli, &mut session, format).await;
            if format == OutputFormat::Json {
                println!("{}", report.to_json());
            }
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        RunMode::ShowConfig => Ok(ExitCode::SUCCESS),
    }
}

/// Console logs go to stderr; `[logging] directory` adds a daily file
fn init_logging(verbose: u8, directory: Option<&str>) -> Option<WorkerGuard> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let appender = tracing_appender::rolling::daily(dir, "page-rag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}

fn repl_config(config: &FileConfig, quiet: bool) -> ReplConfig {
    ReplConfig {
        show_progress: config.repl.show_progress && !quiet,
        history_file: config.repl.history_file.clone(),
    }
}

/// Load `--url`, then answer the question; stops at the first failure
async fn run_one_shot(cli: &Cli, session: &mut Session, format: OutputFormat) -> OneShotReport {
    let text = format == OutputFormat::Text;
    let spinner = text && !cli.quiet;
    let progress: Box<dyn ProgressNotifier> = if spinner {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };
    let mut report = OneShotReport::default();

    if let Some(url) = &cli.url {
        let result = session.ingest_with_progress(url, progress.as_ref()).await;
        if text {
            match &result {
                Ok(output) if !spinner => {
                    for notice in &output.notices {
                        println!("{}", ConsoleFormatter::notice(notice));
                    }
                }
                Ok(_) => {}
                Err(e) => eprintln!("{}", ConsoleFormatter::notice(&e.notice())),
            }
        }
        report.record_ingest(url, &result);
    }

    if cli.show_content {
        report.record_content(session.current_document());
        if text && let Some(doc) = session.current_document() {
            println!("{}", ConsoleFormatter::content(doc));
        }
    }

    if let Some(question) = &cli.question
        && report.is_success()
    {
        let result = session.ask_with_progress(question, progress.as_ref()).await;
        if text {
            match &result {
                Ok(output) => println!("\n{}", ConsoleFormatter::answer(question, &output.answer)),
                Err(e) => eprintln!("{}", ConsoleFormatter::notice(&e.notice())),
            }
        }
        report.record_ask(question, &result);
    }

    report
}
