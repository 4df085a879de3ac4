use std::path::{Path, PathBuf};

use na_core::{Article, Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Static per-provider snapshot used when live sources are off or broken.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfflineSnapshot {
    #[serde(default)]
    pub guardian: Vec<Article>,
    #[serde(default)]
    pub nyt: Vec<Article>,
}

impl OfflineSnapshot {
    /// Flattens the snapshot in source registry order.
    pub fn into_articles(self) -> Vec<Article> {
        let mut articles = self.guardian;
        articles.extend(self.nyt);
        articles
    }
}

#[derive(Debug, Clone)]
pub struct OfflineStore {
    path: PathBuf,
}

impl OfflineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<OfflineSnapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Offline(format!("Failed to read {}: {}", self.path.display(), e)))?;
        let snapshot: OfflineSnapshot = serde_json::from_str(&raw)?;
        debug!(
            path = %self.path.display(),
            guardian = snapshot.guardian.len(),
            nyt = snapshot.nyt.len(),
            "loaded offline snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_snapshot(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_concatenates_in_order() {
        let file = write_snapshot(
            r#"{
                "guardian": [{"source":"Guardian","title":"G","url":"https://g/1","description":""}],
                "nyt": [
                    {"source":"NYT","title":"N1","url":"https://n/1","description":"d"},
                    {"source":"NYT","title":null,"url":"https://n/2","description":null}
                ]
            }"#,
        );

        let articles = OfflineStore::new(file.path()).load().await.unwrap().into_articles();
        let urls: Vec<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://g/1", "https://n/1", "https://n/2"]);
        assert_eq!(articles[2].title, "");
    }

    #[tokio::test]
    async fn test_missing_arrays_default_to_empty() {
        let file = write_snapshot(r#"{"nyt": []}"#);
        let snapshot = OfflineStore::new(file.path()).load().await.unwrap();
        assert!(snapshot.into_articles().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let store = OfflineStore::new("/nonexistent/offline.json");
        assert!(matches!(store.load().await, Err(Error::Offline(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let file = write_snapshot("{ not json");
        assert!(matches!(
            OfflineStore::new(file.path()).load().await,
            Err(Error::Serialization(_))
        ));
    }
}
