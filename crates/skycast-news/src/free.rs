//! Keyless headlines provider.
//!
//! The provider serves static per-category JSON under
//! `/{category}/us.json`, so the requested category must come from its
//! fixed set; anything else is normalized to `general`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::source::NewsSource;
use crate::types::{NewsArticle, NewsError, WireArticle};

/// Categories the keyless provider actually serves.
const VALID_CATEGORIES: [&str; 7] = [
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// Map a requested category onto the provider's fixed set.
pub fn normalize_category(category: &str) -> &str {
    let lowered = category.to_lowercase();
    VALID_CATEGORIES
        .iter()
        .find(|c| **c == lowered)
        .copied()
        .unwrap_or("general")
}

#[derive(Debug, Deserialize)]
struct FreeResponse {
    articles: Option<Vec<WireArticle>>,
}

/// Second tier: the keyless provider. No key, no query parameters.
#[derive(Debug, Clone)]
pub struct FreeNewsSource {
    client: Client,
    base_url: String,
}

impl FreeNewsSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NewsSource for FreeNewsSource {
    fn name(&self) -> &'static str {
        "free"
    }

    #[instrument(skip(self), level = "info")]
    async fn fetch(
        &self,
        category: &str,
        _page_size: u32,
    ) -> Result<Vec<NewsArticle>, NewsError> {
        let selected = normalize_category(category);
        let url = format!("{}/{}/us.json", self.base_url, selected);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: FreeResponse = response
            .json()
            .await
            .map_err(|e| NewsError::UpstreamFormat(e.to_string()))?;

        let articles = body.articles.unwrap_or_default();
        if articles.is_empty() {
            return Err(NewsError::NoArticles);
        }

        tracing::debug!(
            category = selected,
            count = articles.len(),
            "Free provider returned headlines"
        );
        Ok(articles.into_iter().map(WireArticle::normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("sports"), "sports");
        assert_eq!(normalize_category("Sports"), "sports");
        assert_eq!(normalize_category("TECHNOLOGY"), "technology");
        assert_eq!(normalize_category("xyz"), "general");
        assert_eq!(normalize_category("depressing"), "general");
        assert_eq!(normalize_category(""), "general");
    }

    #[tokio::test]
    async fn test_fetch_uses_category_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sports/us.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "articles": [{"title": "Match report"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = FreeNewsSource::new(server.uri());
        let articles = source.fetch("sports", 20).await.unwrap();
        assert_eq!(articles[0].title, "Match report");
    }

    #[tokio::test]
    async fn test_unknown_category_falls_back_to_general() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/general/us.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "articles": [{"title": "General news"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = FreeNewsSource::new(server.uri());
        let articles = source.fetch("xyz", 20).await.unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_articles_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let source = FreeNewsSource::new(server.uri());
        let err = source.fetch("general", 20).await.unwrap_err();
        assert!(matches!(err, NewsError::NoArticles));
    }

    #[tokio::test]
    async fn test_empty_articles_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"articles": []})),
            )
            .mount(&server)
            .await;

        let source = FreeNewsSource::new(server.uri());
        let err = source.fetch("general", 20).await.unwrap_err();
        assert!(matches!(err, NewsError::NoArticles));
    }
}
