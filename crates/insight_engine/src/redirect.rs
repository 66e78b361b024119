use insight_core::{Failure, ResolvedLocator};
use insight_logging::insight_debug;
use reqwest::{redirect::Policy, Client};

use crate::RedirectSettings;

/// Follows redirects to find where a link really points.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    client: Client,
}

impl RedirectResolver {
    pub fn new(settings: RedirectSettings) -> Result<Self, Failure> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| Failure::transport(err.to_string()))?;
        Ok(Self { client })
    }

    /// Final URL after redirects, whatever the response status.
    ///
    /// Any failure falls back to `url` unchanged; the result is therefore not
    /// guaranteed to be reachable.
    pub async fn resolve(&self, url: &str) -> ResolvedLocator {
        match self.client.get(url).send().await {
            Ok(response) => {
                let resolved = response.url().as_str();
                if resolved != url {
                    insight_debug!("Resolved {} -> {}", url, resolved);
                }
                ResolvedLocator::new(resolved)
            }
            Err(err) => {
                insight_debug!("Redirect resolution failed for {}: {}", url, err);
                ResolvedLocator::new(url)
            }
        }
    }
}
