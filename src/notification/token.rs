//! Sources for the system token sent with every cloud request.

use crate::config::CloudConfig;
use crate::core::TokenProvider;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("no system token source is configured")]
    NotConfigured,

    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// A token fixed at configuration time.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn system_token(&self) -> Result<String, TokenError> {
        Ok(self.0.clone())
    }
}

/// Fetches the token from an HTTP endpoint on every call.
#[derive(Debug, Clone)]
pub struct HttpTokenProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpTokenProvider {
    pub fn new(url: String, timeout: Duration) -> Result<Self, TokenError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl TokenProvider for HttpTokenProvider {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn system_token(&self) -> Result<String, TokenError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TokenError::Status { status, body });
        }
        debug!("Fetched system token.");
        Ok(body.trim().to_string())
    }
}

/// Used when neither a static token nor a token URL is configured, so the
/// failure surfaces per call instead of at startup.
#[derive(Debug, Clone, Copy)]
pub struct MissingToken;

#[async_trait]
impl TokenProvider for MissingToken {
    async fn system_token(&self) -> Result<String, TokenError> {
        Err(TokenError::NotConfigured)
    }
}

/// Picks a token source from configuration. A static token wins over a URL.
pub fn from_config(config: &CloudConfig) -> Result<Arc<dyn TokenProvider>, TokenError> {
    if let Some(token) = config.token.as_ref().filter(|t| !t.trim().is_empty()) {
        return Ok(Arc::new(StaticToken(token.clone())));
    }
    match &config.token_url {
        Some(url) => Ok(Arc::new(HttpTokenProvider::new(
            url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?)),
        None => Ok(Arc::new(MissingToken)),
    }
}
