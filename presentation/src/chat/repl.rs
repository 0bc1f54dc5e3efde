//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::progress::ProgressReporter;
use colored::Colorize;
use pagerag_application::{
    ContentScraper, NoProgress, ProgressNotifier, SessionBackend, SessionController,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// A parsed REPL input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/load <url>`; the URL may be empty
    Load(String),
    Content,
    Stats,
    Help,
    Quit,
    Unknown(String),
    /// Any line that is not a command
    Ask(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return ReplCommand::Ask(line.to_string());
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match cmd {
            "/load" | "/l" => ReplCommand::Load(rest.to_string()),
            "/content" => ReplCommand::Content,
            "/stats" => ReplCommand::Stats,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(cmd.to_string()),
        }
    }
}

/// Interactive chat REPL over one session
pub struct ChatRepl<S: ContentScraper + 'static, B: SessionBackend + 'static> {
    session: SessionController<S, B>,
    config: ReplConfig,
    initial_url: Option<String>,
}

impl<S: ContentScraper + 'static, B: SessionBackend + 'static> ChatRepl<S, B> {
    pub fn new(session: SessionController<S, B>) -> Self {
        Self {
            session,
            config: ReplConfig::default(),
            initial_url: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Load this URL before the first prompt
    pub fn with_initial_url(mut self, url: Option<String>) -> Self {
        self.initial_url = url;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(url) = self.initial_url.take() {
            self.load(&url).await;
        }

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if self.dispatch(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Execute one command. Returns true if the REPL should exit.
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Load(url) => self.load(&url).await,
            ReplCommand::Ask(question) => self.ask(&question).await,
            ReplCommand::Content => match self.session.current_document() {
                Some(doc) => println!("{}", ConsoleFormatter::content(doc)),
                None => println!("{}", "No webpage loaded yet. Use /load <url>.".dimmed()),
            },
            ReplCommand::Stats => match self.session.stored_passages().await {
                Ok(count) => println!(
                    "{}",
                    ConsoleFormatter::stats(self.session.current_document(), count)
                ),
                Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
            },
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        }
    }

    async fn load(&mut self, url: &str) {
        let progress = self.progress();
        match self.session.ingest_with_progress(url, progress.as_ref()).await {
            Ok(output) => {
                // The spinner reporter has already printed these
                if !self.config.show_progress {
                    for notice in &output.notices {
                        println!("{}", ConsoleFormatter::notice(notice));
                    }
                }
                if let Some(doc) = self.session.current_document() {
                    println!("{}", ConsoleFormatter::document_summary(doc));
                }
            }
            Err(e) => println!("{}", ConsoleFormatter::notice(&e.notice())),
        }
        println!();
    }

    async fn ask(&mut self, question: &str) {
        println!();
        let progress = self.progress();
        match self.session.ask_with_progress(question, progress.as_ref()).await {
            Ok(output) => println!("{}", ConsoleFormatter::answer(question, &output.answer)),
            Err(e) => println!("{}", ConsoleFormatter::notice(&e.notice())),
        }
        println!();
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        page-rag - Webpage Q&A with RAG      │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Store: {}",
            self.session.config().persist_directory.display()
        );
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /load <url>       - Load a webpage into the store");
        println!("  /content          - Show the loaded webpage text");
        println!("  /stats            - Show the loaded page and passage count");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Anything else is asked as a question about the loaded page.");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_with_url() {
        assert_eq!(
            ReplCommand::parse("/load   https://example.com "),
            ReplCommand::Load("https://example.com".to_string())
        );
    }

    #[test]
    fn test_parse_load_without_url() {
        assert_eq!(ReplCommand::parse("/load"), ReplCommand::Load(String::new()));
    }

    #[test]
    fn test_parse_question() {
        assert_eq!(
            ReplCommand::parse("What is the main topic?"),
            ReplCommand::Ask("What is the main topic?".to_string())
        );
    }

    #[test]
    fn test_parse_quit_aliases() {
        for cmd in ["/quit", "/exit", "/q"] {
            assert_eq!(ReplCommand::parse(cmd), ReplCommand::Quit);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            ReplCommand::parse("/models"),
            ReplCommand::Unknown("/models".to_string())
        );
        assert_eq!(ReplCommand::parse("/content"), ReplCommand::Content);
        assert_eq!(ReplCommand::parse("/stats"), ReplCommand::Stats);
    }
}
