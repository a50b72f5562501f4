//! HEAD-request based reachability probe.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::UrlValidator;

/// Probes URLs with a HEAD request. Any 2xx answer counts as reachable.
#[derive(Debug, Clone)]
pub struct HttpUrlValidator {
    client: Client,
}

impl HttpUrlValidator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(url, status = status.as_u16(), "Reachability probe answered");
                status.is_success()
            }
            Err(e) => {
                debug!(url, error = %e, "Reachability probe failed");
                false
            }
        }
    }
}
