use std::fmt;

use crate::Failure;

/// A single feed entry offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Locator believed to point at the content itself.
///
/// Holds the final URL after redirect resolution, the original URL when
/// resolution failed, or an `upload:` pseudo-locator for local documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedLocator(String);

impl ResolvedLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn for_upload(name: &str) -> Self {
        Self(format!("upload:{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub source: ResolvedLocator,
    pub raw_text: String,
    /// Length of `raw_text` in characters.
    pub length: usize,
}

impl ExtractedText {
    pub fn new(source: ResolvedLocator, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let length = raw_text.chars().count();
        Self {
            source,
            raw_text,
            length,
        }
    }

    /// Rejects text shorter than `min_chars`. A minimum of 0 accepts everything.
    pub fn ensure_min_chars(self, min_chars: usize) -> Result<Self, Failure> {
        if self.length < min_chars {
            return Err(Failure::too_short(format!(
                "extracted {} characters from {}, need at least {min_chars}",
                self.length, self.source
            )));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub subject_title: String,
    pub body: String,
}

/// Outcome of the topic mode: which headline was picked, where it led, and
/// the analysis of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicAnalysis {
    pub headline: Headline,
    pub resolved: ResolvedLocator,
    pub report: AnalysisReport,
}
