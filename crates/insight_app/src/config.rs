//! RON configuration for the insight binary.
//!
//! Every field is optional; missing ones take the engine defaults. Durations
//! are whole seconds.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use insight_engine::{EngineSettings, FetchStrategy, ProcessSettings};
use insight_logging::insight_info;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "insight.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    Browser,
    Archive,
    Direct,
}

impl From<StrategyName> for FetchStrategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Browser => FetchStrategy::Browser,
            StrategyName::Archive => FetchStrategy::Archive,
            StrategyName::Direct => FetchStrategy::Direct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub base_url: String,
    pub language: String,
    pub region: String,
    pub edition: String,
    pub max_items: usize,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let feed = EngineSettings::default().feed;
        Self {
            base_url: feed.base_url,
            language: feed.language,
            region: feed.region,
            edition: feed.edition,
            max_items: feed.max_items,
            timeout_secs: feed.request_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl From<ProcessSettings> for ProcessConfig {
    fn from(settings: ProcessSettings) -> Self {
        Self {
            program: settings.program,
            args: settings.args,
            timeout_secs: settings.timeout.as_secs(),
        }
    }
}

impl ProcessConfig {
    fn to_settings(&self) -> ProcessSettings {
        ProcessSettings {
            program: self.program.clone(),
            args: self.args.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for DirectConfig {
    fn default() -> Self {
        let http = EngineSettings::default().http;
        Self {
            connect_timeout_secs: http.connect_timeout.as_secs(),
            timeout_secs: http.request_timeout.as_secs(),
            max_bytes: http.max_bytes,
            user_agent: http.user_agent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub host: String,
    pub model: String,
    pub max_tokens: u32,
    /// Replaces the built-in analyst instructions.
    pub instructions: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let model = EngineSettings::default().model;
        Self {
            host: model.host,
            model: model.model,
            max_tokens: model.max_tokens,
            instructions: None,
            timeout_secs: model.request_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub redirect_timeout_secs: u64,
    pub browser: ProcessConfig,
    pub archive: ProcessConfig,
    pub direct: DirectConfig,
    pub model: ModelConfig,
    pub topic_fetcher: StrategyName,
    pub url_fetcher: StrategyName,
    /// 0 accepts any extraction length.
    pub min_text_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            feed: FeedConfig::default(),
            redirect_timeout_secs: engine.redirect.timeout.as_secs(),
            browser: engine.browser.into(),
            archive: engine.archive.into(),
            direct: DirectConfig::default(),
            model: ModelConfig::default(),
            topic_fetcher: StrategyName::Browser,
            url_fetcher: StrategyName::Archive,
            min_text_chars: engine.min_text_chars,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), else `./insight.ron` when
    /// present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        insight_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    pub fn to_engine_settings(&self) -> EngineSettings {
        let mut settings = EngineSettings::default();

        settings.feed.base_url = self.feed.base_url.clone();
        settings.feed.language = self.feed.language.clone();
        settings.feed.region = self.feed.region.clone();
        settings.feed.edition = self.feed.edition.clone();
        settings.feed.max_items = self.feed.max_items;
        settings.feed.request_timeout = Duration::from_secs(self.feed.timeout_secs);

        settings.redirect.timeout = Duration::from_secs(self.redirect_timeout_secs);
        settings.browser = self.browser.to_settings();
        settings.archive = self.archive.to_settings();

        settings.http.connect_timeout = Duration::from_secs(self.direct.connect_timeout_secs);
        settings.http.request_timeout = Duration::from_secs(self.direct.timeout_secs);
        settings.http.max_bytes = self.direct.max_bytes;
        settings.http.user_agent = self.direct.user_agent.clone();

        settings.model.host = self.model.host.clone();
        settings.model.model = self.model.model.clone();
        settings.model.max_tokens = self.model.max_tokens;
        if let Some(instructions) = &self.model.instructions {
            settings.model.instructions = instructions.clone();
        }
        settings.model.request_timeout = Duration::from_secs(self.model.timeout_secs);

        settings.topic_strategy = self.topic_fetcher.into();
        settings.url_strategy = self.url_fetcher.into();
        settings.min_text_chars = self.min_text_chars;
        settings
    }
}
