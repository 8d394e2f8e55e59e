//! Keyed headlines provider (NewsAPI-compatible).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::source::NewsSource;
use crate::types::{NewsArticle, NewsError, WireArticle};

/// Headlines are always requested for this country.
const COUNTRY: &str = "us";

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<WireArticle>,
}

/// First tier: the keyed provider.
///
/// Only constructed when an API key is configured. The provider reports
/// success through its own `status` field; anything else is a failure even
/// on HTTP 200.
#[derive(Debug, Clone)]
pub struct KeyedNewsSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KeyedNewsSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl NewsSource for KeyedNewsSource {
    fn name(&self) -> &'static str {
        "keyed"
    }

    #[instrument(skip(self), level = "info")]
    async fn fetch(
        &self,
        category: &str,
        page_size: u32,
    ) -> Result<Vec<NewsArticle>, NewsError> {
        let url = format!("{}/top-headlines", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", category.to_string()),
                ("country", COUNTRY.to_string()),
                ("pageSize", page_size.to_string()),
                ("apiKey", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: HeadlinesResponse = response
            .json()
            .await
            .map_err(|e| NewsError::UpstreamFormat(e.to_string()))?;

        match body.status.as_deref() {
            Some("ok") => {
                tracing::debug!(count = body.articles.len(), "Keyed provider returned headlines");
                Ok(body.articles.into_iter().map(WireArticle::normalize).collect())
            }
            other => Err(NewsError::Api(
                body.message
                    .unwrap_or_else(|| format!("provider status: {}", other.unwrap_or("missing"))),
            )),
        }
    }
}
