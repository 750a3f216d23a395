use std::time::Duration;

use reqwest::Client;
use tokio::time::timeout;

use crate::config::DeliveryConfig;
use crate::service::error::DeliveryError;

/// Client the delivery service uses to fetch wire text from the render service.
///
/// One request per incoming request; no pooling policy, retry or backoff.
#[derive(Clone)]
pub struct RenderClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl RenderClient {
    pub fn new(config: &DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(DeliveryError::Client)?;

        Ok(Self {
            client,
            base_url: config.render_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    /// Fetches the wire text for `path`.
    ///
    /// A non-success status becomes [`DeliveryError::Upstream`] carrying it.
    pub async fn fetch(&self, path: &str) -> Result<String, DeliveryError> {
        match timeout(self.request_timeout, self.do_fetch(path)).await {
            Ok(response) => response,
            Err(_) => Err(DeliveryError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn do_fetch(&self, path: &str) -> Result<String, DeliveryError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Fetching from render service");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DeliveryError::Connection {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Upstream {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(DeliveryError::Body)
    }
}
