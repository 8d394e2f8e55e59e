//! Built-in sample headlines: the infallible last tier.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::source::NewsSource;
use crate::types::{NewsArticle, NewsError};

/// The fixed sample set with synthetic recent timestamps.
pub fn sample_articles() -> Vec<NewsArticle> {
    let now = Utc::now();
    let article = |title: &str, description: &str, url: &str, source: &str, age: Duration,
                   author: &str| NewsArticle {
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        published_at: (now - age).to_rfc3339(),
        url_to_image: None,
        author: Some(author.to_string()),
    };

    vec![
        article(
            "Breaking: Major Tech Breakthrough Announced",
            "Scientists have made a significant breakthrough in quantum computing technology that could revolutionize the industry.",
            "https://example.com/article1",
            "Tech News",
            Duration::hours(2),
            "John Smith",
        ),
        article(
            "Global Climate Summit Reaches Historic Agreement",
            "World leaders have agreed on new measures to combat climate change in what's being called a historic moment.",
            "https://example.com/article2",
            "World News",
            Duration::hours(5),
            "Jane Doe",
        ),
        article(
            "Stock Markets Rally on Economic News",
            "Major stock indices surged today following positive economic indicators and corporate earnings reports.",
            "https://example.com/article3",
            "Business Today",
            Duration::days(1),
            "Mike Johnson",
        ),
        article(
            "New Health Study Reveals Surprising Results",
            "A comprehensive study on nutrition has revealed unexpected benefits of certain dietary practices.",
            "https://example.com/article4",
            "Health Tribune",
            Duration::days(2),
            "Dr. Sarah Wilson",
        ),
        article(
            "Championship Game Sets New Viewership Records",
            "Last night's championship game broke multiple viewership records and delivered thrilling entertainment.",
            "https://example.com/article5",
            "Sports Central",
            Duration::days(3),
            "Tom Rodriguez",
        ),
    ]
}

/// Third tier: always succeeds with the built-in set.
#[derive(Debug, Clone, Default)]
pub struct SampleNewsSource;

#[async_trait]
impl NewsSource for SampleNewsSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn fetch(
        &self,
        _category: &str,
        _page_size: u32,
    ) -> Result<Vec<NewsArticle>, NewsError> {
        Ok(sample_articles())
    }
}
