use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A normalized headline, identical across all tiers.
///
/// Articles live only for the current session; they are never deduplicated
/// or persisted across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    /// ISO-8601 publication timestamp.
    pub published_at: String,
    pub url_to_image: Option<String>,
    pub author: Option<String>,
}

/// Article as both upstream providers ship it.
#[derive(Debug, Deserialize)]
pub(crate) struct WireArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<WireSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSource {
    name: Option<String>,
}

impl WireArticle {
    /// Fill documented placeholders for anything the upstream omitted.
    pub(crate) fn normalize(self) -> NewsArticle {
        NewsArticle {
            title: self.title.unwrap_or_else(|| "No title available".to_string()),
            description: self
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            url: self.url.unwrap_or_default(),
            source: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown Source".to_string()),
            published_at: self.published_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
            url_to_image: self.url_to_image,
            author: self.author,
        }
    }
}

/// Failures internal to the fallback chain; `NewsClient::fetch_news`
/// never surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Unexpected response shape: {0}")]
    UpstreamFormat(String),
    #[error("No articles found")]
    NoArticles,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_normalize_fills_placeholders() {
        let wire: WireArticle = serde_json::from_str("{}").unwrap();
        let article = wire.normalize();
        assert_eq!(article.title, "No title available");
        assert_eq!(article.description, "No description available");
        assert_eq!(article.url, "");
        assert_eq!(article.source, "Unknown Source");
        assert!(!article.published_at.is_empty());
        assert!(article.author.is_none());
    }

    #[test]
    fn test_normalize_keeps_upstream_fields() {
        let wire: WireArticle = serde_json::from_value(serde_json::json!({
            "title": "Headline",
            "description": "Body",
            "url": "https://example.com/a",
            "source": {"name": "Example Times"},
            "publishedAt": "2024-05-01T12:00:00Z",
            "urlToImage": "https://example.com/a.jpg",
            "author": "A. Writer"
        }))
        .unwrap();
        let article = wire.normalize();
        assert_eq!(article.title, "Headline");
        assert_eq!(article.source, "Example Times");
        assert_eq!(article.published_at, "2024-05-01T12:00:00Z");
        assert_eq!(article.url_to_image.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(article.author.as_deref(), Some("A. Writer"));
    }

    #[test]
    fn test_normalize_handles_null_source_name() {
        let wire: WireArticle = serde_json::from_value(serde_json::json!({
            "title": "Headline",
            "source": {"name": null}
        }))
        .unwrap();
        assert_eq!(wire.normalize().source, "Unknown Source");
    }
}
