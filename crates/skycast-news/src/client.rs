//! The fallback chain.

use tracing::instrument;

use crate::free::FreeNewsSource;
use crate::keyed::KeyedNewsSource;
use crate::sample::{sample_articles, SampleNewsSource};
use crate::source::NewsSource;
use crate::types::NewsArticle;

/// Ordered chain of news tiers.
///
/// Each tier gets exactly one attempt; its failure is logged and discarded
/// and the next tier runs. The default chain ends with the sample tier, so
/// a fetch always yields a non-empty result.
pub struct NewsClient {
    sources: Vec<Box<dyn NewsSource>>,
}

impl NewsClient {
    /// Build the standard three-tier chain.
    ///
    /// The keyed tier is present only when an API key is supplied.
    pub fn new(
        api_key: Option<String>,
        keyed_base_url: impl Into<String>,
        free_base_url: impl Into<String>,
    ) -> Self {
        let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            sources.push(Box::new(KeyedNewsSource::new(keyed_base_url, key)));
        } else {
            tracing::info!("No news API key configured, skipping keyed tier");
        }
        sources.push(Box::new(FreeNewsSource::new(free_base_url)));
        sources.push(Box::new(SampleNewsSource));
        Self { sources }
    }

    /// Build a chain from explicit tiers.
    pub fn from_sources(sources: Vec<Box<dyn NewsSource>>) -> Self {
        Self { sources }
    }

    /// Fetch headlines for the category.
    ///
    /// Infallible: tier failures fall through, and an exhausted chain
    /// still yields the built-in sample set.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_news(&self, category: &str, page_size: u32) -> Vec<NewsArticle> {
        for source in &self.sources {
            match source.fetch(category, page_size).await {
                Ok(articles) => {
                    tracing::info!(
                        tier = source.name(),
                        count = articles.len(),
                        "News fetch succeeded"
                    );
                    return articles;
                }
                Err(e) => {
                    tracing::warn!(tier = source.name(), error = %e, "News tier failed");
                }
            }
        }

        tracing::warn!("All news tiers failed, using built-in samples");
        sample_articles()
    }
}
