//! A client for the cloud notification API.

use crate::notification::NotifyError;
use crate::signing::NotificationRequest;
use std::time::Duration;
use tracing::debug;

pub const SMS_PATH: &str = "sendsms";
pub const MAIL_PATH: &str = "sendmail";

/// Posts signed, form-encoded requests to the cloud API.
#[derive(Debug, Clone)]
pub struct CloudClient {
    client: reqwest::Client,
    api_url: String,
}

impl CloudClient {
    /// Creates a new `CloudClient` rooted at `api_url`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Posts a request and returns the response body.
    ///
    /// Any non-2xx status is an error carrying the body the API sent back.
    pub async fn post(&self, path: &str, request: &NotificationRequest) -> Result<String, NotifyError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Posting cloud notification request");

        let response = self.client.post(&url).form(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = %status, body = %body, "Cloud API rejected notification request");
            return Err(NotifyError::Api { status, body });
        }
        Ok(body)
    }
}
