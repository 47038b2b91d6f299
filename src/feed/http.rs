//! HTTP feed source backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::feed::{Feed, FeedSource, rss};
use crate::models::ScraperConfig;

/// Feed source that fetches per-court RSS documents over HTTPS.
pub struct HttpFeedSource {
    client: Client,
    feed_url: String,
}

impl HttpFeedSource {
    /// Create a feed source with a client configured from settings.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
        })
    }

    /// Feed URL for a court, from the configured template.
    fn court_url(&self, court: &str) -> String {
        self.feed_url.replace("{court}", court)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, court: &str) -> Result<Feed> {
        let url = self.court_url(court);
        log::debug!("Fetching {} feed from {}", court, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(AppError::fetch(court, status));
        }

        let body = response.text().await?;
        let entries = rss::parse_feed(&body)?;
        Ok(Feed { status, entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_url_substitution() {
        let source = HttpFeedSource::new(&ScraperConfig::default()).unwrap();
        assert_eq!(
            source.court_url("ilnd"),
            "https://ecf.ilnd.uscourts.gov/cgi-bin/rss_outside.pl"
        );
    }
}
