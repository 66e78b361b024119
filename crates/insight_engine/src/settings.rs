use std::time::Duration;

use insight_core::{DEFAULT_INSTRUCTIONS, DEFAULT_MAX_TOKENS, MAX_HEADLINES};

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    /// `hl` parameter.
    pub language: String,
    /// `gl` parameter.
    pub region: String,
    /// `ceid` parameter.
    pub edition: String,
    pub max_items: usize,
    pub request_timeout: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://news.google.com/rss/search".to_string(),
            language: "en-AU".to_string(),
            region: "AU".to_string(),
            edition: "AU:en".to_string(),
            max_items: MAX_HEADLINES,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedirectSettings {
    pub timeout: Duration,
    pub redirect_limit: usize,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            redirect_limit: 10,
        }
    }
}

/// External text-fetching process. The target URL is appended to `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSettings {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ProcessSettings {
    /// Headless browser with stealth plugins, for JS-rendered or bot-guarded pages.
    pub fn browser() -> Self {
        Self {
            program: "node".to_string(),
            args: vec!["fetch_page_puppeteer.js".to_string()],
            timeout: Duration::from_secs(180),
        }
    }

    /// Browser fetch that falls back to a public archive mirror for paywalled pages.
    pub fn archive() -> Self {
        Self {
            program: "node".to_string(),
            args: vec!["fetch_page.js".to_string()],
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpFetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for HttpFetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 10,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: "Mozilla/5.0 (compatible; insight/0.1)".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Base address of the chat endpoint, without the `/api/chat` path.
    pub host: String,
    pub model: String,
    pub max_tokens: u32,
    pub instructions: String,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            request_timeout: Duration::from_secs(600),
        }
    }
}

/// Which text fetcher serves an acquisition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    Browser,
    Archive,
    Direct,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub feed: FeedSettings,
    pub redirect: RedirectSettings,
    pub browser: ProcessSettings,
    pub archive: ProcessSettings,
    pub http: HttpFetchSettings,
    pub model: ModelSettings,
    pub topic_strategy: FetchStrategy,
    pub url_strategy: FetchStrategy,
    /// Shortest acceptable extraction; 0 disables the check.
    pub min_text_chars: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            feed: FeedSettings::default(),
            redirect: RedirectSettings::default(),
            browser: ProcessSettings::browser(),
            archive: ProcessSettings::archive(),
            http: HttpFetchSettings::default(),
            model: ModelSettings::default(),
            topic_strategy: FetchStrategy::Browser,
            url_strategy: FetchStrategy::Archive,
            min_text_chars: 0,
        }
    }
}
