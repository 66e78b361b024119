use std::process::Stdio;

use insight_core::{ExtractedText, Failure, ResolvedLocator};
use insight_logging::{insight_info, insight_warn};
use tokio::process::Command;

use crate::ProcessSettings;

/// Capability to turn a locator into article text.
#[async_trait::async_trait]
pub trait TextFetcher: Send + Sync {
    /// Short label used in logs and failure messages.
    fn name(&self) -> &str;

    async fn fetch_text(&self, locator: &ResolvedLocator) -> Result<ExtractedText, Failure>;
}

/// Delegates fetching to an external program that prints the page text.
///
/// The program gets the URL as its last argument. Exit status 0 with text on
/// stdout is success; anything on stderr is the diagnostic otherwise. The
/// child is killed when the wall-clock bound expires and no partial output is
/// kept.
#[derive(Debug, Clone)]
pub struct ProcessTextFetcher {
    name: String,
    settings: ProcessSettings,
    min_text_chars: usize,
}

impl ProcessTextFetcher {
    pub fn new(name: impl Into<String>, settings: ProcessSettings) -> Self {
        Self {
            name: name.into(),
            settings,
            min_text_chars: 0,
        }
    }

    pub fn browser() -> Self {
        Self::new("browser", ProcessSettings::browser())
    }

    pub fn archive() -> Self {
        Self::new("archive", ProcessSettings::archive())
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    pub fn settings(&self) -> &ProcessSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl TextFetcher for ProcessTextFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_text(&self, locator: &ResolvedLocator) -> Result<ExtractedText, Failure> {
        insight_info!(
            "Fetching {} with {} fetcher (limit {:?})",
            locator,
            self.name,
            self.settings.timeout
        );

        let child = Command::new(&self.settings.program)
            .args(&self.settings.args)
            .arg(locator.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                Failure::fetch_process(format!(
                    "{} fetcher could not start `{}`: {err}",
                    self.name, self.settings.program
                ))
            })?;

        let output = match tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                return Err(Failure::fetch_process(format!(
                    "{} fetcher lost its child process: {err}",
                    self.name
                )));
            }
            Err(_) => {
                insight_warn!("{} fetcher timed out on {}", self.name, locator);
                return Err(Failure::fetch_timeout(format!(
                    "{} fetcher gave up on {} after {:?}",
                    self.name, locator, self.settings.timeout
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = stdout.trim();
        let stderr = stderr.trim();

        if !output.status.success() {
            return Err(Failure::fetch_process(format!(
                "{} fetcher failed ({}): {stderr}",
                self.name, output.status
            )));
        }
        if stdout.is_empty() && !stderr.is_empty() {
            return Err(Failure::fetch_process(format!(
                "{} fetcher produced no text: {stderr}",
                self.name
            )));
        }
        if !stderr.is_empty() {
            insight_warn!("{} fetcher reported on stderr: {}", self.name, stderr);
        }

        ExtractedText::new(locator.clone(), stdout).ensure_min_chars(self.min_text_chars)
    }
}
