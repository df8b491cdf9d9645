use async_trait::async_trait;
use ferrous_cdn_application::ports::OriginFetcher;
use ferrous_cdn_application::services::TIMEOUT_STATUS;
use ferrous_cdn_domain::config::OriginConfig;
use ferrous_cdn_domain::{CacheEntry, CacheKey, DomainError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Synthetic status for connection, DNS and body-read failures.
pub const UNREACHABLE_STATUS: u16 = 502;

/// Used when the origin answers 200 without a `Content-Type` header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Origin client: one GET per fetch, no redirects followed.
pub struct HttpOriginFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpOriginFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::InvalidConfig(format!("origin URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::InvalidConfig(format!(
                "origin URL '{base_url}' cannot be used as a base"
            )));
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .user_agent(user_agent)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| DomainError::InvalidConfig(format!("HTTP client: {e}")))?;

        info!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Origin client ready");

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &OriginConfig) -> Result<Self, DomainError> {
        Self::new(&config.base_url, config.timeout(), &config.user_agent)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `key` onto the base URL. The result must stay under the base, so
    /// `..` segments that climb out of it are rejected.
    pub fn origin_url(&self, key: &CacheKey) -> Result<Url, DomainError> {
        // Relative form, or a `:` in the first segment would parse as a scheme.
        let url = self
            .base_url
            .join(&format!("./{key}"))
            .map_err(|e| DomainError::MalformedKey(format!("'{key}': {e}")))?;

        if !url.as_str().starts_with(self.base_url.as_str()) || url == self.base_url {
            return Err(DomainError::MalformedKey(format!(
                "'{key}' does not resolve under {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    fn transport_failure(key: &CacheKey, error: &reqwest::Error) -> CacheEntry {
        let status = if error.is_timeout() {
            TIMEOUT_STATUS
        } else {
            UNREACHABLE_STATUS
        };
        debug!(key = %key, error = %error, status, "Origin transport failure");
        CacheEntry::failure(status)
    }
}

#[async_trait]
impl OriginFetcher for HttpOriginFetcher {
    fn validate(&self, key: &CacheKey) -> Result<(), DomainError> {
        self.origin_url(key).map(|_| ())
    }

    async fn fetch(&self, key: &CacheKey) -> Result<CacheEntry, DomainError> {
        let url = self.origin_url(key)?;
        debug!(key = %key, url = %url, "Fetching from origin");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Ok(Self::transport_failure(key, &e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(key = %key, status = status.as_u16(), "Origin returned non-200");
            return Ok(CacheEntry::failure(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        // A body cut short is a failed fetch, never a truncated success.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Ok(Self::transport_failure(key, &e)),
        };

        debug!(
            key = %key,
            content_type = %content_type,
            body_len = body.len(),
            "Origin response received"
        );

        Ok(CacheEntry::success(content_type, body))
    }
}
