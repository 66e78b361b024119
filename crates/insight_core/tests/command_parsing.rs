use std::path::PathBuf;
use std::sync::Once;

use insight_core::{parse_command, Command, CommandError, DEFAULT_TOPIC};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(insight_logging::initialize_for_tests);
}

#[test]
fn topic_keeps_full_query() {
    init_logging();
    assert_eq!(
        parse_command("topic  interest rates  RBA "),
        Ok(Command::Topic("interest rates  RBA".to_string()))
    );
}

#[test]
fn topic_without_query_uses_default() {
    init_logging();
    assert_eq!(
        parse_command("topic"),
        Ok(Command::Topic(DEFAULT_TOPIC.to_string()))
    );
}

#[test]
fn url_is_trimmed_and_validated() {
    init_logging();
    assert_eq!(
        parse_command("url   https://example.com/story  "),
        Ok(Command::Url("https://example.com/story".to_string()))
    );
    assert_eq!(parse_command("url"), Err(CommandError::InvalidUrl));
    assert_eq!(parse_command("url    "), Err(CommandError::InvalidUrl));
    assert_eq!(parse_command("url not a url"), Err(CommandError::InvalidUrl));
    assert_eq!(
        parse_command("url ftp://example.com/file"),
        Err(CommandError::InvalidUrl)
    );
}

#[test]
fn pdf_requires_path() {
    init_logging();
    assert_eq!(
        parse_command("pdf ./reports/q3 summary.pdf"),
        Ok(Command::Pdf(PathBuf::from("./reports/q3 summary.pdf")))
    );
    assert_eq!(parse_command("pdf"), Err(CommandError::MissingPath));
}

#[test]
fn verbs_are_case_insensitive_and_have_aliases() {
    init_logging();
    assert_eq!(parse_command("QUIT"), Ok(Command::Quit));
    assert_eq!(parse_command("exit"), Ok(Command::Quit));
    assert_eq!(parse_command("?"), Ok(Command::Help));
    assert_eq!(parse_command("Cache"), Ok(Command::CacheInfo));
    assert_eq!(parse_command("clear"), Ok(Command::ClearCache));
}

#[test]
fn blank_line_is_noop_and_unknown_verb_is_rejected() {
    init_logging();
    assert_eq!(parse_command("   "), Ok(Command::NoOp));
    assert_eq!(
        parse_command("fetch everything"),
        Err(CommandError::Unknown("fetch".to_string()))
    );
}
