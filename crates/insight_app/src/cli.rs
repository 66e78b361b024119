use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, StrategyName};
use crate::logging::LogDestination;

/// Fetch news articles or documents and have a local model critique them.
#[derive(Debug, Parser)]
#[command(name = "insight", version, about)]
pub struct Cli {
    /// RON configuration file (defaults to ./insight.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "file", global = true)]
    pub log: LogDestination,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model name sent to the chat endpoint.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base address of the chat endpoint.
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub topic_fetcher: Option<StrategyName>,

    #[arg(long, value_enum, global = true)]
    pub url_fetcher: Option<StrategyName>,

    /// Reject extractions shorter than this many characters.
    #[arg(long, global = true)]
    pub min_chars: Option<usize>,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Analyze a random recent article about a topic.
    Topic {
        /// Search words; "Australia finance" when empty.
        query: Vec<String>,
    },
    /// Analyze the article at a URL.
    Url { url: String },
    /// Extract and analyze a PDF document.
    Pdf {
        path: PathBuf,
        /// Only print the extracted text preview.
        #[arg(long)]
        preview_only: bool,
    },
    /// Interactive session sharing one text cache.
    Shell,
}

impl Cli {
    /// Command-line values win over the configuration file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
        if let Some(host) = &self.host {
            config.model.host = host.clone();
        }
        if let Some(strategy) = self.topic_fetcher {
            config.topic_fetcher = strategy;
        }
        if let Some(strategy) = self.url_fetcher {
            config.url_fetcher = strategy;
        }
        if let Some(min) = self.min_chars {
            config.min_text_chars = min;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn topic_words_are_collected() {
        let cli = Cli::parse_from(["insight", "topic", "interest", "rates"]);
        match cli.command {
            Action::Topic { query } => assert_eq!(query, vec!["interest", "rates"]),
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(cli.log, LogDestination::File);
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "insight",
            "--model",
            "mistral",
            "--url-fetcher",
            "direct",
            "--min-chars",
            "50",
            "url",
            "https://example.com/a",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.model.model, "mistral");
        assert_eq!(config.url_fetcher, StrategyName::Direct);
        assert_eq!(config.topic_fetcher, StrategyName::Browser);
        assert_eq!(config.min_text_chars, 50);
    }

    #[test]
    fn pdf_preview_flag() {
        let cli = Cli::parse_from(["insight", "pdf", "report.pdf", "--preview-only"]);
        match cli.command {
            Action::Pdf { path, preview_only } => {
                assert_eq!(path, PathBuf::from("report.pdf"));
                assert!(preview_only);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
