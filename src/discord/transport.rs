use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{BuildError, Result};

/// A response as seen by the retry logic: status, the `Retry-After` header
/// and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub retry_after: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }
}

/// Performs a single authenticated GET. No retries happen at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

/// [`Transport`] backed by a [`reqwest::Client`], authenticating as a bot.
pub struct ReqwestTransport {
    http: reqwest::Client,
    authorization: String,
}

impl ReqwestTransport {
    /// Create a transport with a default [`reqwest::Client`].
    pub fn new(token: &str) -> Self {
        Self::with_client(reqwest::Client::new(), token)
    }

    /// Create a transport using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, etc.
    pub fn with_client(client: reqwest::Client, token: &str) -> Self {
        Self {
            http: client,
            authorization: format!("Bot {token}"),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        debug!(url, "sending request");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.authorization)
            .header(USER_AGENT, super::USER_AGENT)
            .send()
            .await
            .map_err(|e| BuildError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.map_err(|e| BuildError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}
