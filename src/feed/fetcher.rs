use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::feed::FeedError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam between the pipeline and the network, so tests can script
/// failures without a server.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError>;
}

/// reqwest-backed fetcher with a hard per-request timeout and optional
/// same-origin proxy routing.
pub struct HttpFetcher {
    client: Client,
    proxy_base_url: Option<String>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TIMEOUT, None)
    }

    pub fn with_config(timeout: Duration, proxy_base_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("kapitel/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            proxy_base_url: proxy_base_url.filter(|p| !p.is_empty()),
        }
    }

    /// The URL actually requested. With a proxy base configured, the target
    /// is percent-encoded and appended; the proxy forwards it unmodified.
    /// Which proxy (if any) is purely deployment configuration.
    fn request_url(&self, url: &str) -> String {
        match &self.proxy_base_url {
            Some(base) => format!("{}{}", base, urlencoding::encode(url)),
            None => url.to_string(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let request_url = self.request_url(url);
        tracing::debug!(%url, %request_url, "fetching feed");

        let response = self.client.get(&request_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::network(
                format!("HTTP {} from {}", status, url),
                Some(status.as_u16()),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
