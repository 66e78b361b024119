//! News search feed client.
//!
//! Queries an RSS search endpoint for a topic and hands back one of the top
//! entries at random.

use insight_core::{select_headline, Failure, Headline};
use insight_logging::{insight_info, insight_warn};
use reqwest::Client;
use url::Url;

use crate::FeedSettings;

#[derive(Debug, Clone)]
pub struct HeadlineResolver {
    client: Client,
    settings: FeedSettings,
}

impl HeadlineResolver {
    pub fn new(settings: FeedSettings) -> Result<Self, Failure> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| Failure::transport(err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Picks a random headline for `topic` among the first
    /// `max_items` feed entries.
    ///
    /// Transport and parse failures are logged and reported as `None`, the
    /// same as an empty feed. Use [`HeadlineResolver::search`] to tell them
    /// apart.
    pub async fn random_headline(&self, topic: &str) -> Option<Headline> {
        match self.search(topic).await {
            Ok(headlines) => {
                select_headline(headlines, self.settings.max_items, &mut rand::rng())
            }
            Err(failure) => {
                insight_warn!("Headline search for {:?} failed: {}", topic, failure);
                None
            }
        }
    }

    /// All complete feed entries for `topic`, in document order.
    pub async fn search(&self, topic: &str) -> Result<Vec<Headline>, Failure> {
        let url = self.feed_url(topic)?;
        insight_info!("Fetching headline feed: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| Failure::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure::transport(format!("feed returned status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| Failure::transport(err.to_string()))?;

        let headlines = parse_feed(&body)?;
        insight_info!("Feed returned {} items for {:?}", headlines.len(), topic);
        Ok(headlines)
    }

    fn feed_url(&self, topic: &str) -> Result<Url, Failure> {
        Url::parse_with_params(
            &self.settings.base_url,
            &[
                ("q", topic),
                ("hl", self.settings.language.as_str()),
                ("gl", self.settings.region.as_str()),
                ("ceid", self.settings.edition.as_str()),
            ],
        )
        .map_err(|err| Failure::transport(format!("invalid feed url: {err}")))
    }
}

/// Items lacking a title or a link are skipped.
fn parse_feed(body: &[u8]) -> Result<Vec<Headline>, Failure> {
    let channel = rss::Channel::read_from(body)
        .map_err(|err| Failure::extraction(format!("failed to parse feed: {err}")))?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim();
            let link = item.link()?.trim();
            if title.is_empty() || link.is_empty() {
                return None;
            }
            Some(Headline::new(title, link))
        })
        .collect())
}
