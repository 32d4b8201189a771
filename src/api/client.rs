//! RefineClient trait and HTTP implementation

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ServiceConfig;

use super::error::FALLBACK_ERROR;
use super::{ApiError, HealthStatus, PromptSubmission, RefineResult};

/// Stateless client for the refinement service
///
/// Each call is one independent request - no retry, no caching, no
/// batching. Single-flight discipline is enforced by the caller, not
/// here.
#[async_trait]
pub trait RefineClient: Send + Sync {
    /// Submit a prompt for refinement
    async fn refine(&self, submission: &PromptSubmission) -> Result<RefineResult, ApiError>;

    /// Check service reachability
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

/// Structured error payload from the service; `detail` is optional
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Extract a displayable message from a non-success response body
///
/// Falls back to the generic message when the body is empty, not JSON,
/// or missing the `detail` field.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

/// HTTP client for the refinement service
pub struct HttpRefineClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRefineClient {
    /// Build a client from the service configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ApiError> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "HttpRefineClient::from_config: called");
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl RefineClient for HttpRefineClient {
    async fn refine(&self, submission: &PromptSubmission) -> Result<RefineResult, ApiError> {
        let url = format!("{}/api/refine", self.base_url);
        debug!(%url, detail_level = %submission.detail_level, "HttpRefineClient::refine: sending request");

        let response = self.http.post(&url).json(submission).send().await.map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            debug!(status = status.as_u16(), %message, "HttpRefineClient::refine: service error");
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<RefineResult>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/api/health", self.base_url);
        debug!(%url, "HttpRefineClient::health: checking service");

        let response = self.http.get(&url).send().await.map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
