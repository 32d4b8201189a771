//! Refinement service API
//!
//! Wire types, the error taxonomy, and the HTTP client for the remote
//! refinement service. The client sends exactly one request per call -
//! no retry, no caching, no batching.

mod client;
mod error;
mod types;

pub use client::{HttpRefineClient, RefineClient};
pub use error::{ApiError, FALLBACK_ERROR};
pub use types::{DetailLevel, HealthStatus, PromptAnalysis, PromptSubmission, RefineResult};

#[cfg(test)]
pub use client::mock::MockRefineClient;
