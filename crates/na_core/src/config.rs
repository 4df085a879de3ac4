use std::path::PathBuf;
use std::time::Duration;

use crate::pagination::PAGE_SIZE;

pub const DEFAULT_OFFLINE_DATA_PATH: &str = "public/offline.json";
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between attempts against the same upstream.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Process-wide settings handed to the sources and the aggregator when they are built.
#[derive(Debug, Clone)]
pub struct Config {
    pub guardian_api_key: Option<String>,
    pub nyt_api_key: Option<String>,
    /// Skip live sources and serve the offline snapshot only.
    pub offline_mode: bool,
    pub offline_data_path: PathBuf,
    /// Upper bound on one HTTP attempt against a source.
    pub source_timeout: Duration,
    /// Extra attempts after a transient upstream failure.
    pub max_retries: u32,
    pub page_size: usize,
}

impl Config {
    /// Time a whole source call may take: every attempt at `source_timeout`
    /// plus the backoff between them.
    pub fn source_budget(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        self.source_timeout
            .saturating_mul(attempts)
            .saturating_add(RETRY_BACKOFF.saturating_mul(self.max_retries))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            guardian_api_key: None,
            nyt_api_key: None,
            offline_mode: false,
            offline_data_path: PathBuf::from(DEFAULT_OFFLINE_DATA_PATH),
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
            max_retries: 1,
            page_size: PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_budget_leaves_room_for_retries() {
        let config = Config {
            source_timeout: Duration::from_millis(300),
            max_retries: 1,
            ..Config::default()
        };
        assert_eq!(config.source_budget(), Duration::from_millis(850));

        let no_retry = Config {
            max_retries: 0,
            ..Config::default()
        };
        assert_eq!(no_retry.source_budget(), DEFAULT_SOURCE_TIMEOUT);
    }
}
