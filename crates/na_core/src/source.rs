use async_trait::async_trait;

use crate::models::Article;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Display name stamped on every article from this source.
    fn name(&self) -> &str;

    /// Searches the upstream provider for `keyword` on the given one-based page.
    ///
    /// Never fails: transport errors, bad statuses and malformed bodies are
    /// logged and produce an empty list.
    async fn fetch(&self, keyword: &str, page: u32) -> Vec<Article>;
}
