//! Console output formatter for session results

use colored::Colorize;
use pagerag_domain::{LoadedDocument, Notice, NoticeKind, preview};

/// Width of headers and rules
const WIDTH: usize = 60;

/// Formats notices, answers and page content for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One notice, prefixed with a marker for its kind
    pub fn notice(notice: &Notice) -> String {
        match notice.kind {
            NoticeKind::Success => format!("{} {}", "v".green().bold(), notice.message.green()),
            NoticeKind::Warning => format!("{} {}", "!".yellow().bold(), notice.message.yellow()),
            NoticeKind::Error => format!("{} {}", "x".red().bold(), notice.message.red()),
            NoticeKind::Fault => format!("{} {}", "x".red().bold(), notice.message.red().bold()),
        }
    }

    /// Question and answer, answer text unmodified
    pub fn answer(question: &str, answer: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));
        output.push_str(&format!("{}\n", "Answer:".cyan().bold()));
        output.push_str(answer);
        output.push('\n');
        output
    }

    /// One-line summary of the loaded page
    pub fn document_summary(document: &LoadedDocument) -> String {
        format!(
            "{} {} ({} bytes)\n  {}",
            "Loaded:".cyan().bold(),
            document.url,
            document.len(),
            preview(&document.text, 100).dimmed()
        )
    }

    /// Full text of the loaded page between rules
    pub fn content(document: &LoadedDocument) -> String {
        let mut output = Self::header(&format!("Content of {}", document.url));
        output.push('\n');
        output.push_str(&document.text);
        output.push_str(&Self::footer());
        output
    }

    /// Store statistics for `/stats`
    pub fn stats(document: Option<&LoadedDocument>, passages: usize) -> String {
        let loaded = match document {
            Some(doc) => format!("{} ({} bytes)", doc.url, doc.len()),
            None => "none".dimmed().to_string(),
        };
        format!(
            "{} {}\n{} {}",
            "Current page:".cyan().bold(),
            loaded,
            "Stored passages:".cyan().bold(),
            passages
        )
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^WIDTH$}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
