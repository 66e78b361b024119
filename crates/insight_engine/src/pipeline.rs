use std::sync::Arc;

use insight_core::{
    AnalysisReport, ExtractedText, Failure, PromptTemplate, ResolvedLocator, SessionCache,
    TopicAnalysis,
};
use insight_logging::{begin_run, insight_debug, insight_info};

use crate::{
    AnalysisRequestor, EngineSettings, FetchStrategy, HeadlineResolver, HttpTextFetcher,
    ModelClient, OllamaClient, PdfExtractor, ProcessTextFetcher, RedirectResolver, TextFetcher,
};

/// Subject title used when the user supplies a bare URL.
pub const URL_ANALYSIS_TITLE: &str = "Custom URL Analysis";

/// Acquire text, then analyze it. One operation per user action; each runs
/// to completion or to its first failure.
pub struct Pipeline {
    headlines: HeadlineResolver,
    redirects: RedirectResolver,
    topic_fetcher: Arc<dyn TextFetcher>,
    url_fetcher: Arc<dyn TextFetcher>,
    pdf: PdfExtractor,
    analyst: AnalysisRequestor,
}

impl Pipeline {
    /// Builds the pipeline with the fetchers and model client named in `settings`.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, Failure> {
        let topic_fetcher = build_fetcher(settings.topic_strategy, settings)?;
        let url_fetcher = build_fetcher(settings.url_strategy, settings)?;
        let model = Arc::new(OllamaClient::new(&settings.model)?);
        Self::new(settings, topic_fetcher, url_fetcher, model)
    }

    /// Builds the pipeline around caller-supplied fetchers and model client.
    pub fn new(
        settings: &EngineSettings,
        topic_fetcher: Arc<dyn TextFetcher>,
        url_fetcher: Arc<dyn TextFetcher>,
        model: Arc<dyn ModelClient>,
    ) -> Result<Self, Failure> {
        let template = PromptTemplate::new(
            settings.model.instructions.clone(),
            settings.model.max_tokens,
        );
        Ok(Self {
            headlines: HeadlineResolver::new(settings.feed.clone())?,
            redirects: RedirectResolver::new(settings.redirect.clone())?,
            topic_fetcher,
            url_fetcher,
            pdf: PdfExtractor::new().with_min_text_chars(settings.min_text_chars),
            analyst: AnalysisRequestor::new(template, model),
        })
    }

    /// Search the feed, follow the chosen headline and analyze its article.
    ///
    /// `Ok(None)` means the search produced no usable headline.
    pub async fn analyze_topic(
        &self,
        topic: &str,
        cache: &mut SessionCache,
    ) -> Result<Option<TopicAnalysis>, Failure> {
        let run = begin_run();
        let topic = topic.trim();
        insight_info!("Run {} started: topic {:?}", run, topic);

        let Some(headline) = self.headlines.random_headline(topic).await else {
            insight_info!("No headline found for {:?}", topic);
            return Ok(None);
        };
        insight_info!("Picked headline {:?} -> {}", headline.title, headline.link);

        let resolved = self.redirects.resolve(&headline.link).await;
        let text = fetch_cached(self.topic_fetcher.as_ref(), &resolved, cache).await?;
        let report = self.analyst.analyze(&headline.title, &text.raw_text).await?;

        Ok(Some(TopicAnalysis {
            headline,
            resolved,
            report,
        }))
    }

    /// Fetch a user-supplied URL as-is and analyze it.
    pub async fn analyze_url(
        &self,
        url: &str,
        cache: &mut SessionCache,
    ) -> Result<AnalysisReport, Failure> {
        let run = begin_run();
        let locator = ResolvedLocator::new(url.trim());
        insight_info!("Run {} started: url {}", run, locator);

        let text = fetch_cached(self.url_fetcher.as_ref(), &locator, cache).await?;
        self.analyst.analyze(URL_ANALYSIS_TITLE, &text.raw_text).await
    }

    pub fn extract_pdf(&self, name: &str, bytes: &[u8]) -> Result<ExtractedText, Failure> {
        let run = begin_run();
        insight_info!("Run {} started: pdf {} ({} bytes)", run, name, bytes.len());
        self.pdf.extract(name, bytes)
    }

    /// Analyze text that was already extracted, such as a PDF shown to the user first.
    pub async fn analyze_extracted(
        &self,
        title: &str,
        text: &ExtractedText,
    ) -> Result<AnalysisReport, Failure> {
        self.analyst.analyze(title, &text.raw_text).await
    }
}

async fn fetch_cached(
    fetcher: &dyn TextFetcher,
    locator: &ResolvedLocator,
    cache: &mut SessionCache,
) -> Result<ExtractedText, Failure> {
    if let Some(hit) = cache.get(locator) {
        insight_debug!("Session cache hit for {}", locator);
        return Ok(hit.clone());
    }
    let text = fetcher.fetch_text(locator).await?;
    insight_info!(
        "{} fetcher returned {} characters for {}",
        fetcher.name(),
        text.length,
        locator
    );
    cache.put(text.clone());
    Ok(text)
}

fn build_fetcher(
    strategy: FetchStrategy,
    settings: &EngineSettings,
) -> Result<Arc<dyn TextFetcher>, Failure> {
    let min = settings.min_text_chars;
    Ok(match strategy {
        FetchStrategy::Browser => Arc::new(
            ProcessTextFetcher::new("browser", settings.browser.clone()).with_min_text_chars(min),
        ),
        FetchStrategy::Archive => Arc::new(
            ProcessTextFetcher::new("archive", settings.archive.clone()).with_min_text_chars(min),
        ),
        FetchStrategy::Direct => {
            Arc::new(HttpTextFetcher::new(settings.http.clone())?.with_min_text_chars(min))
        }
    })
}
