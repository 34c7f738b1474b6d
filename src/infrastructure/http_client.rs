//! HTTP client for portal page fetching.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "usd-quotes/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Pooled reqwest wrapper; one instance is shared across every handler and is
/// safe for concurrent in-flight resolutions.
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch a URL and return the body text. The response status is not
    /// inspected; callers hand the body to the HTML parser as-is.
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch URL: {url}"))?;

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from: {url}"))?;

        debug!("Fetched {} ({} chars)", url, text.len());
        Ok(text)
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}
