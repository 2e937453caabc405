//! The network seam.
//!
//! # Design
//! `Transport` is the only place I/O happens. The executor is generic over it,
//! so tests substitute a stub that returns canned responses or failures while
//! production code uses `ReqwestTransport`.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::TransportConfig;
use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse};

/// Sends one HTTP request and resolves to the response or a failure.
///
/// Any HTTP status, including 4xx/5xx, is a successful round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, RequestError> {
        Self::with_config(&TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| RequestError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = self.client.request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| RequestError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}
