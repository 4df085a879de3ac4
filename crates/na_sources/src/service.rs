use std::sync::Arc;
use std::time::Instant;

use na_core::{paginate, Config, LinkBuilder, Result, SearchQuery, SearchResponse};
use tracing::info;

use crate::http::{HttpClient, ReqwestHttpClient};
use crate::pipeline::Aggregator;

/// Runs a sanitized query through aggregation and pagination and builds the
/// response body.
pub struct SearchService {
    aggregator: Aggregator,
    offline_mode: bool,
    page_size: usize,
}

impl SearchService {
    pub fn new(aggregator: Aggregator, offline_mode: bool, page_size: usize) -> Self {
        Self {
            aggregator,
            offline_mode,
            page_size,
        }
    }

    /// Builds the live HTTP transport and default sources from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client: Arc<dyn HttpClient> =
            Arc::new(ReqwestHttpClient::new(config.source_timeout, config.max_retries)?);
        Ok(Self::new(
            Aggregator::from_config(config, client),
            config.offline_mode,
            config.page_size,
        ))
    }

    pub fn source_names(&self) -> Vec<String> {
        self.aggregator.source_names()
    }

    /// `started` marks when the request arrived, for `timeTakenMs`.
    pub async fn search(&self, query: &SearchQuery, started: Instant) -> SearchResponse {
        info!(keyword = %query.keyword, page = query.page, city = %query.city, "🔍 Searching");

        let aggregation = self
            .aggregator
            .aggregate(&query.keyword, query.page, self.offline_mode)
            .await;
        let links = LinkBuilder::new(&query.keyword, &query.city);
        let envelope = paginate(aggregation.articles, query.page, self.page_size, &links);

        info!(
            total = envelope.total_results,
            page = envelope.current_page,
            pages = envelope.total_pages,
            "✅ Search completed"
        );

        SearchResponse::from_envelope(
            envelope,
            &query.keyword,
            &query.city,
            elapsed_ms(started),
            aggregation.error,
        )
    }
}

pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::OfflineStore;
    use async_trait::async_trait;
    use na_core::{Article, NewsSource, PAGE_SIZE};
    use std::time::Duration;

    struct FixedSource {
        name: &'static str,
        urls: Vec<usize>,
    }

    #[async_trait]
    impl NewsSource for FixedSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, keyword: &str, _page: u32) -> Vec<Article> {
            self.urls
                .iter()
                .map(|i| Article::new(self.name, format!("{keyword} {i}"), format!("https://x/{i}"), ""))
                .collect()
        }
    }

    fn service(first: Vec<usize>, second: Vec<usize>) -> SearchService {
        let aggregator = Aggregator::new(
            vec![
                Arc::new(FixedSource { name: "Guardian", urls: first }),
                Arc::new(FixedSource { name: "NYT", urls: second }),
            ],
            OfflineStore::new("/nonexistent.json"),
            Duration::from_secs(5),
        );
        SearchService::new(aggregator, false, PAGE_SIZE)
    }

    #[tokio::test]
    async fn test_overlapping_sources_paginate_over_union() {
        let service = service((0..6).collect(), (5..12).collect());
        let response = service
            .search(&SearchQuery::new("apple", 1, "New York"), Instant::now())
            .await;

        assert_eq!(response.total_results, 12);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.current_page, 1);
        assert_eq!(response.page_no, 1);
        assert_eq!(response.articles.len(), 10);
        assert_eq!(response.prev_page, None);
        assert_eq!(response.next_page, Some(2));
        assert_eq!(response.error, None);
        assert_eq!(response.search_keyword, "apple");
        assert_eq!(
            response.links.next.as_deref(),
            Some("/search?keyword=apple&city=New%20York&page=2")
        );
    }

    #[tokio::test]
    async fn test_high_page_clamps() {
        let service = service((0..25).collect(), vec![]);
        let response = service
            .search(&SearchQuery::new("apple", 9999, "Boston"), Instant::now())
            .await;

        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 3);
        assert_eq!(response.articles.len(), 5);
        assert_eq!(response.prev_page, Some(2));
        assert_eq!(response.city, "Boston");
    }

    #[tokio::test]
    async fn test_empty_result_is_page_zero() {
        let service = service(vec![], vec![]);
        let response = service
            .search(&SearchQuery::new("nothing", 2, "New York"), Instant::now())
            .await;

        assert_eq!(response.total_results, 0);
        assert_eq!(response.total_pages, 0);
        assert_eq!(response.current_page, 0);
        assert!(response.articles.is_empty());
        assert_eq!(response.next_page, None);
        assert_eq!(response.error, None);
    }
}
