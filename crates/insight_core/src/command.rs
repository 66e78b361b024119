use std::path::PathBuf;

use url::Url;

/// Topic searched when the user gives none.
pub const DEFAULT_TOPIC: &str = "Australia finance";

pub const HELP_TEXT: &str = "\
Commands:
  topic [QUERY]   fetch and analyze a random article about QUERY
  url URL         analyze a single article
  pdf PATH        extract and analyze a PDF document
  cache           show how many texts are cached this session
  clear           forget cached texts
  help            show this help
  quit            leave the session";

/// One line of input from the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search the feed for a topic and analyze a random hit.
    Topic(String),
    /// Analyze the article at a user-supplied URL.
    Url(String),
    /// Extract and analyze a local PDF.
    Pdf(PathBuf),
    CacheInfo,
    ClearCache,
    Help,
    Quit,
    /// Blank line.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Please paste a valid URL.")]
    InvalidUrl,
    #[error("Please give the path of a PDF file.")]
    MissingPath,
    #[error("unknown command `{0}`; type `help` for the list of commands")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(Command::NoOp),
        "topic" | "search" => {
            let topic = if rest.is_empty() { DEFAULT_TOPIC } else { rest };
            Ok(Command::Topic(topic.to_string()))
        }
        "url" => validate_article_url(rest).map(Command::Url),
        "pdf" => {
            if rest.is_empty() {
                Err(CommandError::MissingPath)
            } else {
                Ok(Command::Pdf(PathBuf::from(rest)))
            }
        }
        "cache" => Ok(Command::CacheInfo),
        "clear" => Ok(Command::ClearCache),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}

/// Accepts a trimmed, absolute http(s) URL.
pub fn validate_article_url(raw: &str) -> Result<String, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::InvalidUrl);
    }
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(raw.to_string()),
        _ => Err(CommandError::InvalidUrl),
    }
}
