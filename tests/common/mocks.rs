use async_trait::async_trait;
use chat_relay::{
    Error, Result,
    relay::{UpstreamPayload, UpstreamResponse},
    upstream::UpstreamClient,
};
use std::sync::{Arc, Mutex};

/// Mock upstream client for testing
#[derive(Debug, Clone)]
pub struct MockUpstreamClient {
    pub generated_text: Option<String>,
    pub http_error: Option<(u16, String)>,
    pub requests: Arc<Mutex<Vec<UpstreamPayload>>>,
}

impl MockUpstreamClient {
    pub fn replying(text: &str) -> Self {
        Self {
            generated_text: Some(text.to_string()),
            http_error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_with(status: u16, reason: &str) -> Self {
        Self {
            generated_text: None,
            http_error: Some((status, reason.to_string())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<UpstreamPayload> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn generate(&self, payload: &UpstreamPayload) -> Result<UpstreamResponse> {
        self.requests.lock().unwrap().push(payload.clone());

        if let Some((status, reason)) = &self.http_error {
            return Err(Error::UpstreamHttp {
                status: *status,
                reason: reason.clone(),
            });
        }

        Ok(UpstreamResponse {
            generated_text: self.generated_text.clone(),
        })
    }
}
