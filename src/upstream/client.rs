use crate::{
    Error, Result,
    config::UpstreamConfig,
    relay::{UpstreamPayload, UpstreamResponse},
};
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{StatusCode, Url, header::CONTENT_TYPE};
use std::{error::Error as StdError, time::Duration};
use tracing::debug;

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn generate(&self, payload: &UpstreamPayload) -> Result<UpstreamResponse>;
}

pub struct HttpUpstreamClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpUpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| Error::config(format!("Invalid upstream URL '{}': {}", config.url, e)))?;

        // One request per invocation; nothing is kept warm between calls.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn generate(&self, payload: &UpstreamPayload) -> Result<UpstreamResponse> {
        let body = serde_json::to_vec(payload)?;
        debug!("Sending payload to upstream: {}", String::from_utf8_lossy(&body));

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(transport_reason(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamHttp {
                status: status.as_u16(),
                reason: reason_phrase(status, response.extensions().get::<ReasonPhrase>()),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::transport(transport_reason(&e))
                } else {
                    Error::internal(format!("Failed to read upstream response: {}", e))
                }
            })?;
        debug!("Upstream response: {}", text);

        serde_json::from_str(&text)
            .map_err(|e| Error::contract(format!("Invalid JSON in FastAPI response: {}", e)))
    }
}

/// Reason line as sent by the upstream; hyper only records it when it differs
/// from the canonical phrase.
fn reason_phrase(status: StatusCode, wire: Option<&ReasonPhrase>) -> String {
    match wire {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string(),
    }
}

/// Flattens a reqwest error and its sources into one line.
fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "timed out".to_string();
    }

    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
