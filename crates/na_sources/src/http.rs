use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use na_core::config::RETRY_BACKOFF;
use na_core::{Error, Result};
use tracing::warn;
use url::Url;

/// Status and raw body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Fails with `Error::Status` unless the response is 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Status { status: self.status })
        }
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// reqwest transport with a per-request timeout and bounded retries on
/// transient failures.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    max_retries: u32,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, max_retries: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("newsagg/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, max_retries })
    }

    async fn get_once(&self, url: &Url) -> Result<HttpResponse> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("{}: {}", url.host_str().unwrap_or_default(), e))
            } else {
                Error::Http(e)
            }
        })?;
        let status = response.status().as_u16();
        if status == 429 || (500..600).contains(&status) {
            return Err(Error::Status { status });
        }
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        with_retry(self.max_retries, RETRY_BACKOFF, move || self.get_once(url)).await
    }
}

/// Runs `op`, retrying up to `max_retries` more times while the error is transient.
pub async fn with_retry<T, F, Fut>(max_retries: u32, backoff: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                warn!(attempt, max_retries, error = %e, "transient upstream failure, retrying");
                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}
