//! News tier strategy trait.

use async_trait::async_trait;

use crate::types::{NewsArticle, NewsError};

/// One tier in the fallback chain.
///
/// A tier makes exactly one attempt per call; retrying and falling through
/// is the chain's job, not the tier's.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Tier name for logging.
    fn name(&self) -> &'static str;

    /// Fetch headlines for the category.
    async fn fetch(&self, category: &str, page_size: u32)
        -> Result<Vec<NewsArticle>, NewsError>;
}
