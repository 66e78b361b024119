//! Plain-text presentation of pipeline results.

use insight_core::{prepare_preview, AnalysisReport, ExtractedText, Failure, TopicAnalysis};

pub const NO_ARTICLES: &str = "No articles found. Try a different search term.";

const RULE: &str = "----------------------------------------";

pub fn topic(analysis: &TopicAnalysis) -> String {
    format!(
        "Headline: {}\nSource: {}\n{}",
        analysis.headline.title,
        analysis.resolved,
        report(&analysis.report)
    )
}

pub fn report(report: &AnalysisReport) -> String {
    format!("{RULE}\n{}\n{RULE}\n{}\n", report.subject_title, report.body)
}

pub fn pdf_preview(text: &ExtractedText) -> String {
    format!(
        "Extracted {} characters from {}\n{}\n",
        text.length,
        text.source,
        prepare_preview(&text.raw_text)
    )
}

pub fn failure(failure: &Failure) -> String {
    format!("error: {failure}")
}
