use std::collections::HashSet;

use crate::models::Article;

/// First-seen-wins deduplication keyed on the exact, case-sensitive `url`.
///
/// The earliest article for each URL is kept and later duplicates are dropped,
/// so the output preserves the relative order of first occurrences.
pub fn dedup_first_seen(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::with_capacity(articles.len());
    let before = articles.len();

    let unique: Vec<Article> = articles
        .into_iter()
        .filter(|article| seen.insert(article.url.clone()))
        .collect();

    if unique.len() < before {
        tracing::debug!(dropped = before - unique.len(), "removed duplicate articles");
    }
    unique
}
