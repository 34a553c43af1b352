use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// Issuer endpoints serve single certificates a few KiB in size; the cap
/// bounds memory against hostile or misconfigured servers.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Some CAs redirect issuer URLs to a CDN; anything deeper is suspect.
const REDIRECT_LIMIT: usize = 3;

/// Retrieves raw bytes for a URL, bounded by a per-request timeout.
///
/// Injected into the URL resolver so the loop algorithm can be exercised
/// with deterministic fakes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Default fetcher: a single GET per call, no retries. Transient network
/// failures surface to the caller unrecovered.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Build a fetcher whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
            .build()
            .unwrap_or_default();

        Self {
            client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}
