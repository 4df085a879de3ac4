use std::sync::Arc;

use na_core::{Article, Config, Result};
use tracing::{info, warn};

use crate::http::HttpClient;

pub mod guardian;
pub mod nyt;

pub use guardian::GuardianSource;
pub use nyt::NytSource;

/// The source registry, in query order. Earlier sources win URL ties.
pub fn default_sources(config: &Config, client: Arc<dyn HttpClient>) -> Vec<Arc<dyn na_core::NewsSource>> {
    vec![
        Arc::new(GuardianSource::new(config.guardian_api_key.clone(), client.clone())),
        Arc::new(NytSource::new(config.nyt_api_key.clone(), client)),
    ]
}

/// Collapses an adapter result to a plain list so one upstream's outage
/// never reaches the aggregator.
pub(crate) fn isolate(source: &str, keyword: &str, page: u32, result: Result<Vec<Article>>) -> Vec<Article> {
    match result {
        Ok(articles) => {
            info!(source, keyword, page, count = articles.len(), "✨ fetched articles");
            articles
        }
        Err(e) => {
            warn!(source, keyword, page, error = %e, "failed to fetch articles");
            Vec::new()
        }
    }
}
