use std::sync::Arc;

use async_trait::async_trait;
use na_core::{Article, Error, NewsSource, Result};
use serde::Deserialize;
use url::Url;

use super::isolate;
use crate::http::HttpClient;

/// The Guardian Open Platform content search.
pub struct GuardianSource {
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
    results: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentItem {
    web_title: Option<String>,
    web_url: Option<String>,
    fields: Option<ContentFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentFields {
    trail_text: Option<String>,
}

impl GuardianSource {
    pub const NAME: &'static str = "Guardian";
    const BASE_URL: &'static str = "https://content.guardianapis.com/search";
    /// Largest `page-size` the API accepts.
    const MAX_PAGE_SIZE: u32 = 50;

    pub fn new(api_key: Option<String>, client: Arc<dyn HttpClient>) -> Self {
        Self { api_key, client }
    }

    fn search_url(&self, api_key: &str, keyword: &str, page: u32) -> Result<Url> {
        let page = page.to_string();
        let page_size = Self::MAX_PAGE_SIZE.to_string();
        Url::parse_with_params(
            Self::BASE_URL,
            &[
                ("q", keyword),
                ("api-key", api_key),
                ("page", page.as_str()),
                ("page-size", page_size.as_str()),
                ("show-fields", "trailText"),
            ],
        )
        .map_err(|e| Error::Source(format!("Invalid Guardian URL: {}", e)))
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Source("GUARDIAN_API_KEY is not set".to_string()))?;

        let url = self.search_url(api_key, keyword, page)?;
        let response = self.client.get(&url).await?.error_for_status()?;
        let envelope: SearchEnvelope = serde_json::from_str(&response.body)?;

        Ok(envelope
            .response
            .map(|r| r.results)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                Some(Article {
                    source: Self::NAME.to_string(),
                    title: item.web_title.unwrap_or_default(),
                    url: item.web_url?,
                    description: item.fields.and_then(|f| f.trail_text).unwrap_or_default(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl NewsSource for GuardianSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, keyword: &str, page: u32) -> Vec<Article> {
        isolate(Self::NAME, keyword, page, self.search(keyword, page).await)
    }
}
