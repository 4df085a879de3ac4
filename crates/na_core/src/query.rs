use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_KEYWORD: &str = "apple";
pub const DEFAULT_CITY: &str = "New York";
pub const MAX_TERM_CHARS: usize = 50;
pub const INVALID_KEYWORD: &str = "Invalid keyword after sanitization";

/// Raw query string parameters as received from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub page: Option<String>,
    pub city: Option<String>,
}

/// Sanitized search input. `keyword` is never empty and `page` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub page: u32,
    pub city: String,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, page: u32, city: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: page.max(1),
            city: city.into(),
        }
    }
}

impl SearchParams {
    pub fn sanitize(&self) -> Result<SearchQuery> {
        let keyword = sanitize_term(self.keyword.as_deref(), DEFAULT_KEYWORD);
        if keyword.is_empty() {
            return Err(Error::InvalidQuery(INVALID_KEYWORD.to_string()));
        }

        Ok(SearchQuery {
            keyword,
            page: parse_page(self.page.as_deref()),
            city: sanitize_term(self.city.as_deref(), DEFAULT_CITY),
        })
    }
}

/// Trims, falls back to `default` when blank, keeps the first 50 characters,
/// then drops everything outside `[A-Za-z0-9 ]`.
pub fn sanitize_term(raw: Option<&str>, default: &str) -> String {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(default);
    trimmed
        .chars()
        .take(MAX_TERM_CHARS)
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Reads a leading integer (`"3abc"` is 3). Anything unparsable or below 1 is 1;
/// values too large for `u32` saturate.
pub fn parse_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };

    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits: &str = &rest[..rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())];

    if digits.is_empty() || negative {
        return 1;
    }

    match digits.parse::<u64>() {
        Ok(n) => u32::try_from(n).unwrap_or(u32::MAX).max(1),
        Err(_) => u32::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(keyword: Option<&str>, page: Option<&str>, city: Option<&str>) -> SearchParams {
        SearchParams {
            keyword: keyword.map(String::from),
            page: page.map(String::from),
            city: city.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let query = SearchParams::default().sanitize().unwrap();
        assert_eq!(query, SearchQuery::new("apple", 1, "New York"));
    }

    #[test]
    fn test_blank_keyword_uses_default() {
        let query = params(Some("   "), None, Some("")).sanitize().unwrap();
        assert_eq!(query.keyword, "apple");
        assert_eq!(query.city, "New York");
    }

    #[test]
    fn test_only_disallowed_characters_is_rejected() {
        let err = params(Some("!!!"), None, None).sanitize().unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(ref msg) if msg == INVALID_KEYWORD));
    }

    #[test]
    fn test_strips_punctuation_but_keeps_spaces() {
        let query = params(Some("  rust-lang, news! "), None, Some("São Paulo")).sanitize().unwrap();
        assert_eq!(query.keyword, "rustlang news");
        assert_eq!(query.city, "So Paulo");
    }

    #[test]
    fn test_truncates_before_stripping() {
        let raw = format!("{}{}", "!".repeat(50), "apple");
        assert!(params(Some(&raw), None, None).sanitize().is_err());

        let long = "a".repeat(80);
        assert_eq!(sanitize_term(Some(&long), DEFAULT_KEYWORD).len(), MAX_TERM_CHARS);
    }

    #[test]
    fn test_city_may_sanitize_to_empty() {
        let query = params(Some("apple"), None, Some("###")).sanitize().unwrap();
        assert_eq!(query.city, "");
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("7")), 7);
        assert_eq!(parse_page(Some(" 3abc")), 3);
        assert_eq!(parse_page(Some("+2")), 2);
        assert_eq!(parse_page(Some("99999999999999999999999")), u32::MAX);
    }
}
