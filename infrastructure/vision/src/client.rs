use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use business::domain::receipt::errors::ReceiptError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shared HTTP client configuration for an inference provider.
pub struct InferenceClient {
    pub client: Client,
    api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl InferenceClient {
    /// `api_key` may be absent; every request then fails with a service error.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("HTTP client setup failed, requests have no timeout: {e}");
                Client::default()
            }
        };

        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Result<&str, ReceiptError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ReceiptError::service("inference credential is not configured"))
    }

    /// Sends one request and decodes a successful JSON body.
    pub async fn send_json(&self, request: RequestBuilder) -> Result<serde_json::Value, ReceiptError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ReceiptError::service("inference request timed out")
            } else {
                ReceiptError::service(format!("inference request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(ReceiptError::service(format!(
                "inference service answered {status}: {snippet}"
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ReceiptError::service(format!("inference response was not JSON: {e}")))
    }
}
