use serde::{Deserialize, Deserializer, Serialize};

/// Label reported in every search response.
pub const NEWS_WEBSITE: &str = "My News Aggregator";

/// A normalized article from any provider. Two articles are the same article
/// when their `url` values are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub url: String,
    /// Opaque to this layer; may carry raw markup from upstream.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Article {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// Accepts `null` where a string is expected and yields an empty string.
pub fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// One page of the deduplicated result set plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultEnvelope {
    pub total_results: usize,
    pub total_pages: u32,
    pub current_page: u32,
    pub articles: Vec<Article>,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub links: Links,
}

/// JSON body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub news_website: String,
    pub articles: Vec<Article>,
    pub total_pages: u32,
    pub current_page: u32,
    pub search_keyword: String,
    pub city: String,
    pub page_no: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub total_results: usize,
    pub time_taken_ms: u64,
    #[serde(rename = "_links")]
    pub links: Links,
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn from_envelope(
        envelope: ResultEnvelope,
        keyword: &str,
        city: &str,
        time_taken_ms: u64,
        error: Option<String>,
    ) -> Self {
        Self {
            news_website: NEWS_WEBSITE.to_string(),
            articles: envelope.articles,
            total_pages: envelope.total_pages,
            current_page: envelope.current_page,
            search_keyword: keyword.to_string(),
            city: city.to_string(),
            page_no: envelope.current_page,
            prev_page: envelope.prev_page,
            next_page: envelope.next_page,
            total_results: envelope.total_results,
            time_taken_ms,
            links: envelope.links,
            error,
        }
    }

    /// Body returned alongside a 400 when the query cannot be served.
    pub fn rejected(message: impl Into<String>, time_taken_ms: u64) -> Self {
        Self {
            news_website: NEWS_WEBSITE.to_string(),
            articles: vec![],
            total_pages: 0,
            current_page: 0,
            search_keyword: String::new(),
            city: String::new(),
            page_no: 0,
            prev_page: None,
            next_page: None,
            total_results: 0,
            time_taken_ms,
            links: Links::default(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_nulls_become_empty_strings() {
        let article: Article = serde_json::from_str(
            r#"{"source":"NYT","title":null,"url":"https://x/1","description":null}"#,
        )
        .unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.description, "");
        assert_eq!(article.url, "https://x/1");
    }

    #[test]
    fn test_article_missing_optional_fields() {
        let article: Article = serde_json::from_str(r#"{"url":"https://x/2"}"#).unwrap();
        assert_eq!(article, Article::new("", "", "https://x/2", ""));
    }

    #[test]
    fn test_search_response_wire_names() {
        let response = SearchResponse::rejected("Invalid keyword after sanitization", 3);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["newsWebsite"], NEWS_WEBSITE);
        assert_eq!(json["pageNo"], 0);
        assert_eq!(json["timeTakenMs"], 3);
        assert_eq!(json["_links"]["self"], "");
        assert!(json["_links"]["prev"].is_null());
        assert!(json["prevPage"].is_null());
        assert_eq!(json["error"], "Invalid keyword after sanitization");
    }

    #[test]
    fn test_error_field_serialized_as_null() {
        let response = SearchResponse::from_envelope(ResultEnvelope::default(), "apple", "New York", 0, None);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.as_object().unwrap().contains_key("error"));
        assert!(json["error"].is_null());
        assert_eq!(json["searchKeyword"], "apple");
    }
}
