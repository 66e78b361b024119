//! Insight core: pure data model, failure taxonomy and prompt helpers.
mod cache;
mod command;
mod failure;
mod headline;
mod preview;
mod prompt;
mod types;

pub use cache::SessionCache;
pub use command::{
    parse_command, validate_article_url, Command, CommandError, DEFAULT_TOPIC, HELP_TEXT,
};
pub use failure::{Failure, FailureKind};
pub use headline::{select_headline, MAX_HEADLINES};
pub use preview::{prepare_preview, MAX_PREVIEW_CHARS};
pub use prompt::{ChatPrompt, PromptTemplate, DEFAULT_INSTRUCTIONS, DEFAULT_MAX_TOKENS};
pub use types::{AnalysisReport, ExtractedText, Headline, ResolvedLocator, TopicAnalysis};
