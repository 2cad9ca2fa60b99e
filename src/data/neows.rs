//! NASA NeoWs `/feed` integration.

use std::future::Future;

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::FeedResponse;
use crate::error::FetchError;

/// Anything that can produce a feed for a start date.
///
/// The dataset store is generic over this so it can be exercised without
/// the network.
pub trait FeedSource: Send + Sync {
    fn fetch_feed(
        &self,
        start_date: NaiveDate,
    ) -> impl Future<Output = Result<FeedResponse, FetchError>> + Send;
}

pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NeoWsClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    fn feed_url(&self) -> String {
        format!("{}/feed", self.base_url)
    }
}

impl FeedSource for NeoWsClient {
    async fn fetch_feed(&self, start_date: NaiveDate) -> Result<FeedResponse, FetchError> {
        let start = start_date.format("%Y-%m-%d").to_string();
        debug!(start_date = %start, "requesting NeoWs feed");

        // `without_url()` keeps the api_key query parameter out of messages.
        let resp = self
            .client
            .get(self.feed_url())
            .query(&[("start_date", start.as_str()), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "NeoWs feed returned an error status");
            return Err(FetchError::Http { status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let feed: FeedResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            element_count = feed.element_count,
            dates = feed.near_earth_objects.len(),
            "decoded NeoWs feed"
        );
        Ok(feed)
    }
}
