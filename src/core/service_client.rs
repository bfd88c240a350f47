// src/core/service_client.rs
//! HTTP transport for the generation endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::app_log;
use crate::types::GenerationRequest;

const GENERATE_ENDPOINT: &str = "/api/generate";

/// Status and undecoded body of an endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one generation request. Errors are transport failures only; any
/// HTTP reply, whatever its status, is returned as a [`RawResponse`].
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawResponse>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for the given origin. Without `timeout_seconds` the
    /// request runs until the transport gives up.
    pub fn new(base_url: String, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_ENDPOINT)
    }
}

#[async_trait]
impl GenerationTransport for ServiceClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawResponse> {
        let url = self.endpoint();
        app_log!(info, "Calling generation endpoint: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        let body = response
            .text()
            .await
            .context("Failed to read response text")?;

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
