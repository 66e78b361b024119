use futures_util::StreamExt;
use insight_core::{ExtractedText, Failure, ResolvedLocator};
use insight_logging::{insight_debug, insight_info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};

use crate::decode::decode_page;
use crate::extract::{HtmlTextExtractor, ReadabilityLikeExtractor};
use crate::{HttpFetchSettings, TextFetcher};

/// In-process fetch for pages that need neither a browser nor an archive:
/// plain GET, charset decoding, then readability-like text extraction.
pub struct HttpTextFetcher {
    client: Client,
    settings: HttpFetchSettings,
    extractor: Box<dyn HtmlTextExtractor>,
    min_text_chars: usize,
}

impl HttpTextFetcher {
    pub fn new(settings: HttpFetchSettings) -> Result<Self, Failure> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| Failure::transport(err.to_string()))?;
        Ok(Self {
            client,
            settings,
            extractor: Box::new(ReadabilityLikeExtractor),
            min_text_chars: 0,
        })
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn too_large(&self, actual: u64) -> Failure {
        Failure::transport(format!(
            "response too large (max {} bytes, got {actual})",
            self.settings.max_bytes
        ))
    }

    fn render(
        &self,
        locator: &ResolvedLocator,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<ExtractedText, Failure> {
        let decoded = decode_page(bytes, content_type)?;
        insight_debug!("Decoded {} as {}", locator, decoded.encoding_label);
        let text = self.extractor.extract(&decoded.html);
        ExtractedText::new(locator.clone(), text).ensure_min_chars(self.min_text_chars)
    }
}

#[async_trait::async_trait]
impl TextFetcher for HttpTextFetcher {
    fn name(&self) -> &str {
        "direct"
    }

    async fn fetch_text(&self, locator: &ResolvedLocator) -> Result<ExtractedText, Failure> {
        insight_info!("Fetching {} directly", locator);
        let response = self
            .client
            .get(locator.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure::transport(format!("http status {status}")));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(Failure::extraction(format!("unsupported content type {ct}")));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        self.render(locator, &bytes, content_type.as_deref())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Failure {
    if err.is_timeout() {
        return Failure::fetch_timeout(err.to_string());
    }
    Failure::transport(err.to_string())
}
