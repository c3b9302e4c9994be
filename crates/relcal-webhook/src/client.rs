//! `WebhookClient` - JSON webhook POST primitive.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;
use url::Url;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts a JSON payload to a webhook URL, returning the HTTP status code.
///
/// Status interpretation (which codes count as success) belongs to the
/// dispatcher; this trait only distinguishes "got a response" from
/// transport failure.
#[trait_variant::make(WebhookPost: Send)]
pub trait LocalWebhookPost {
    /// Sends one POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or timeout. A non-success
    /// status code is not an error here.
    async fn post(&self, url: &Url, payload: &Value) -> Result<u16>;
}

/// Webhook delivery client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct WebhookClient {
    /// HTTP client (reqwest).
    http_client: Client,
}

/// Builder for `WebhookClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct WebhookClientBuilder {
    timeout: Option<Duration>,
}

impl WebhookClientBuilder {
    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` build fails.
    pub fn build(self) -> Result<WebhookClient> {
        let http_client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;
        Ok(WebhookClient { http_client })
    }
}

impl WebhookClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::default()
    }
}

impl LocalWebhookPost for WebhookClient {
    #[instrument(skip_all)]
    async fn post(&self, url: &Url, payload: &Value) -> Result<u16> {
        let response = self
            .http_client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .context("webhook request failed")?;

        let status = response.status().as_u16();
        tracing::debug!(status, "Webhook response received");
        Ok(status)
    }
}
