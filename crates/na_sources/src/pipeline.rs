use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use na_core::{dedup_first_seen, Article, Config, Error, NewsSource, Result};
use tracing::{error, info, warn};

use crate::http::HttpClient;
use crate::offline::OfflineStore;
use crate::sources::default_sources;

pub const OFFLINE_EMPTY: &str = "Offline data empty; no articles available";
pub const ALL_SOURCES_FAILED: &str = "API & offline data both failed";

/// Deduplicated articles for one request, plus a degradation notice if the
/// live path had to be abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub articles: Vec<Article>,
    pub error: Option<String>,
}

pub struct Aggregator {
    sources: Vec<Arc<dyn NewsSource>>,
    offline: OfflineStore,
    /// Wall-clock limit on one source's fetch, retries included.
    source_budget: Duration,
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn NewsSource>>, offline: OfflineStore, source_budget: Duration) -> Self {
        Self {
            sources,
            offline,
            source_budget,
        }
    }

    /// Wires up the default source registry from configuration.
    pub fn from_config(config: &Config, client: Arc<dyn HttpClient>) -> Self {
        Self::new(
            default_sources(config, client),
            OfflineStore::new(config.offline_data_path.clone()),
            config.source_budget(),
        )
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn aggregate(&self, keyword: &str, page: u32, offline_mode: bool) -> Aggregation {
        let (merged, error) = if offline_mode {
            info!("📦 Offline mode, serving snapshot");
            let articles = match self.offline.load().await {
                Ok(snapshot) => snapshot.into_articles(),
                Err(e) => {
                    warn!(path = %self.offline.path().display(), error = %e, "failed to load offline data");
                    Vec::new()
                }
            };
            (articles, None)
        } else {
            match self.fetch_live(keyword, page).await {
                Ok(articles) => (articles, None),
                Err(e) => {
                    error!(error = %e, "live fetch failed, falling back to offline data");
                    self.fallback().await
                }
            }
        };

        Aggregation {
            articles: dedup_first_seen(merged),
            error,
        }
    }

    /// Queries every source concurrently and concatenates the results in
    /// registry order, whatever order they complete in.
    async fn fetch_live(&self, keyword: &str, page: u32) -> Result<Vec<Article>> {
        let tasks = self.sources.iter().map(|source| {
            let source = source.clone();
            let keyword = keyword.to_string();
            let timeout = self.source_budget;
            tokio::spawn(async move {
                match tokio::time::timeout(timeout, source.fetch(&keyword, page)).await {
                    Ok(articles) => articles,
                    Err(_) => {
                        warn!(source = source.name(), ?timeout, "source timed out");
                        Vec::new()
                    }
                }
            })
        });

        let mut merged = Vec::new();
        for joined in join_all(tasks).await {
            let articles = joined.map_err(|e| Error::Source(format!("source task failed: {}", e)))?;
            merged.extend(articles);
        }
        Ok(merged)
    }

    async fn fallback(&self) -> (Vec<Article>, Option<String>) {
        match self.offline.load().await {
            Ok(snapshot) => {
                let articles = snapshot.into_articles();
                let error = articles.is_empty().then(|| OFFLINE_EMPTY.to_string());
                (articles, error)
            }
            Err(e) => {
                error!(error = %e, "offline data load failed too");
                (Vec::new(), Some(ALL_SOURCES_FAILED.to_string()))
            }
        }
    }
}
