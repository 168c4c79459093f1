use std::time::{Duration, Instant};

use reqwest::header::USER_AGENT;
use thiserror::Error;
use tracing::{info, warn};

use crate::parser::Page;
use crate::settings::Settings;

/// Failure to obtain the page. Unlike extractor failures, these abort the
/// whole request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch UNIBEN page: timed out after {0} ms")]
    Timeout(u64),
    #[error("Failed to fetch UNIBEN page: server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to fetch UNIBEN page: {0}")]
    Request(#[source] reqwest::Error),
}

/// Fetches the source page. Holds no per-request state, so one instance is
/// shared by every handler.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    url: String,
    user_agent: String,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)?;
        Ok(Self {
            client,
            url: url.to_string(),
            user_agent: user_agent.to_string(),
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        Self::new(
            &settings.url,
            Duration::from_millis(settings.timeout_ms),
            &settings.user_agent,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One GET, no retries.
    pub async fn fetch_html(&self) -> Result<String, FetchError> {
        let start = Instant::now();
        let result = self.get().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(html) => info!(url = %self.url, bytes = html.len(), elapsed_ms, "fetched page"),
            Err(e) => warn!(url = %self.url, elapsed_ms, error = %e, "fetch failed"),
        }
        result
    }

    /// Fetch and parse into the form the extractors consume.
    pub async fn load_page(&self) -> Result<Page, FetchError> {
        let html = self.fetch_html().await?;
        Ok(Page::parse(&html))
    }

    async fn get(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis() as u64)
        } else {
            FetchError::Request(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract::extract_all;
    use crate::testutil;

    const UA: &str = "test-agent/1.0";

    #[tokio::test]
    async fn fetches_and_parses_fixture() {
        let url = testutil::serve_html(testutil::fixture()).await;
        let fetcher = Fetcher::new(&url, Duration::from_secs(5), UA).unwrap();
        let page = fetcher.load_page().await.unwrap();
        assert_eq!(extract_all(&page).hostel_fees.len(), 4);
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let url = testutil::serve_user_agent().await;
        let fetcher = Fetcher::new(&url, Duration::from_secs(5), UA).unwrap();
        assert_eq!(fetcher.fetch_html().await.unwrap(), UA);
    }

    #[tokio::test]
    async fn timeout_is_a_single_descriptive_failure() {
        let url = testutil::silent_url().await;
        let fetcher = Fetcher::new(&url, Duration::from_millis(200), UA).unwrap();
        let err = fetcher.load_page().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(200)), "{err:?}");
        assert_eq!(err.to_string(), "Failed to fetch UNIBEN page: timed out after 200 ms");
    }

    #[tokio::test]
    async fn error_status_fails() {
        let url = testutil::serve_html(String::new()).await;
        let fetcher = Fetcher::new(&format!("{url}missing"), Duration::from_secs(5), UA).unwrap();
        let err = fetcher.fetch_html().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn connection_refused_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = Fetcher::new(&format!("http://{addr}/"), Duration::from_secs(5), UA).unwrap();
        assert!(matches!(fetcher.fetch_html().await, Err(FetchError::Request(_))));
    }
}
