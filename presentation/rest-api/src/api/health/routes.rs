use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::receipt::prompt::SCHEMA_VERSION;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// Service status: "healthy", or "degraded" when no inference credential is configured
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Inference provider used for extraction
    pub provider: String,
    /// Version of the receipt JSON shape requested from the provider
    pub schema_version: u32,
}

/// Health API for monitoring and infrastructure checks
pub struct Api {
    provider: String,
    credential_configured: bool,
}

impl Api {
    pub fn new(provider: impl Into<String>, credential_configured: bool) -> Self {
        Self {
            provider: provider.into(),
            credential_configured,
        }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Returns the current status of the service. A service without an
    /// inference credential stays up but reports "degraded", since every
    /// extraction would fail.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let status = if self.credential_configured {
            "healthy"
        } else {
            "degraded"
        };

        Json(HealthCheckResponse {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider: self.provider.clone(),
            schema_version: SCHEMA_VERSION,
        })
    }
}
