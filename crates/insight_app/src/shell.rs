//! Interactive session. Texts fetched here stay cached until `clear` or exit.

use std::io::{BufRead, Write};

use insight_core::{parse_command, Command, SessionCache, HELP_TEXT};
use insight_engine::Pipeline;
use insight_logging::insight_info;

use crate::actions;

const PROMPT: &str = "insight> ";

pub async fn run_shell<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut cache = SessionCache::new();
    writeln!(out, "Type `help` for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::NoOp => {}
            Command::Topic(query) => {
                actions::topic(pipeline, &mut cache, &query, out).await?;
            }
            Command::Url(url) => {
                actions::url(pipeline, &mut cache, &url, out).await?;
            }
            Command::Pdf(path) => match actions::read_pdf(&path) {
                Ok((name, bytes)) => {
                    actions::pdf(pipeline, &name, &bytes, false, out).await?;
                }
                Err(err) => writeln!(out, "error: {err:#}")?,
            },
            Command::CacheInfo => {
                writeln!(out, "{} text(s) cached this session.", cache.len())?;
            }
            Command::ClearCache => {
                cache.clear();
                writeln!(out, "Cache cleared.")?;
            }
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Quit => break,
        }
    }

    insight_info!("Shell closed with {} cached text(s)", cache.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use insight_core::{ChatPrompt, ExtractedText, Failure, ResolvedLocator};
    use insight_engine::{EngineSettings, ModelCallError, ModelClient, TextFetcher};

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextFetcher for CountingFetcher {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_text(&self, locator: &ResolvedLocator) -> Result<ExtractedText, Failure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if locator.as_str().contains("broken") {
                return Err(Failure::fetch_process("exit status 1: page crashed"));
            }
            Ok(ExtractedText::new(locator.clone(), "Article body."))
        }
    }

    struct CannedModel;

    #[async_trait]
    impl ModelClient for CannedModel {
        async fn complete(&self, _prompt: &ChatPrompt) -> Result<String, ModelCallError> {
            Ok("  Critique.  ".to_string())
        }
    }

    fn session(script: &str) -> (String, usize) {
        let fetcher = Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
        });
        let pipeline = Pipeline::new(
            &EngineSettings::default(),
            fetcher.clone(),
            fetcher.clone(),
            Arc::new(CannedModel),
        )
        .expect("pipeline");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let mut out = Vec::new();
        runtime
            .block_on(run_shell(&pipeline, Cursor::new(script.to_string()), &mut out))
            .expect("shell");
        (
            String::from_utf8(out).expect("utf8"),
            fetcher.calls.load(Ordering::SeqCst),
        )
    }

    #[test]
    fn repeated_url_is_served_from_cache() {
        let (out, calls) = session("url https://a.example/x\nurl https://a.example/x\ncache\nquit\n");
        assert_eq!(calls, 1);
        assert_eq!(out.matches("Custom URL Analysis").count(), 2);
        assert!(out.contains("Critique.\n"));
        assert!(out.contains("1 text(s) cached this session."));
    }

    #[test]
    fn clear_forces_a_refetch() {
        let (out, calls) = session("url https://a.example/x\nclear\nurl https://a.example/x\n");
        assert_eq!(calls, 2);
        assert!(out.contains("Cache cleared."));
    }

    #[test]
    fn bad_input_keeps_the_session_alive() {
        let (out, calls) = session("url\nfrobnicate\nhelp\nurl https://a.example/broken\nquit\n");
        assert_eq!(calls, 1);
        assert!(out.contains("Please paste a valid URL."));
        assert!(out.contains("unknown command `frobnicate`"));
        assert!(out.contains("Commands:"));
        assert!(out.contains("error: fetch process error: exit status 1: page crashed"));
    }

    #[test]
    fn missing_pdf_reports_read_error() {
        let (out, _) = session("pdf /nonexistent/report.pdf\n");
        assert!(out.contains("error: could not read /nonexistent/report.pdf"));
    }
}
