use std::sync::Arc;

use async_trait::async_trait;
use na_core::{Article, Error, NewsSource, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::isolate;
use crate::http::HttpClient;

/// New York Times Article Search v2.
pub struct NytSource {
    api_key: Option<String>,
    client: Arc<dyn HttpClient>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: Option<SearchResponse>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    headline: Option<Headline>,
    web_url: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Headline {
    main: Option<String>,
}

impl NytSource {
    pub const NAME: &'static str = "NYT";
    const BASE_URL: &'static str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";
    /// Article Search pages are zero-based and stop at 100.
    const MAX_PAGE: u32 = 100;

    pub fn new(api_key: Option<String>, client: Arc<dyn HttpClient>) -> Self {
        Self { api_key, client }
    }

    fn search_url(&self, api_key: &str, keyword: &str, upstream_page: u32) -> Result<Url> {
        let page = upstream_page.to_string();
        Url::parse_with_params(
            Self::BASE_URL,
            &[("q", keyword), ("api-key", api_key), ("page", page.as_str())],
        )
        .map_err(|e| Error::Source(format!("Invalid NYT URL: {}", e)))
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Source("NYT_API_KEY is not set".to_string()))?;

        let upstream_page = page.saturating_sub(1);
        if upstream_page > Self::MAX_PAGE {
            debug!(page, "page is past the NYT paging limit");
            return Ok(Vec::new());
        }

        let url = self.search_url(api_key, keyword, upstream_page)?;
        let response = self.client.get(&url).await?.error_for_status()?;
        let envelope: SearchEnvelope = serde_json::from_str(&response.body)?;

        Ok(envelope
            .response
            .map(|r| r.docs)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|doc| {
                Some(Article {
                    source: Self::NAME.to_string(),
                    title: doc.headline.and_then(|h| h.main).unwrap_or_default(),
                    url: doc.web_url?,
                    description: doc.snippet.unwrap_or_default(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl NewsSource for NytSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, keyword: &str, page: u32) -> Vec<Article> {
        isolate(Self::NAME, keyword, page, self.search(keyword, page).await)
    }
}
