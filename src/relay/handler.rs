use super::types::*;
use crate::{Error, Result, config::GenerationConfig, upstream::UpstreamClient};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const MISSING_GENERATED_TEXT: &str = "No 'generated_text' in FastAPI response";

pub struct Relay {
    client: Arc<dyn UpstreamClient>,
    generation: GenerationConfig,
}

impl Relay {
    pub fn new(client: Arc<dyn UpstreamClient>, generation: GenerationConfig) -> Self {
        Self { client, generation }
    }

    /// Handles a raw event, reporting undecodable events as malformed requests.
    pub async fn handle_value(&self, event: Value) -> ResponseEnvelope {
        debug!("Received event: {}", event);

        match serde_json::from_value::<InboundInvocation>(event) {
            Ok(invocation) => self.handle(invocation).await,
            Err(e) => {
                let err = Error::malformed(e.to_string());
                error!("Error: {}", err);
                ResponseEnvelope::from(&err)
            }
        }
    }

    pub async fn handle(&self, invocation: InboundInvocation) -> ResponseEnvelope {
        match self.process(&invocation).await {
            Ok(text) => ResponseEnvelope::success(&text),
            Err(e) => {
                match &e {
                    Error::UpstreamHttp { status, reason } => {
                        warn!("HTTP Error: {} {}", status, reason)
                    }
                    Error::Transport(reason) => warn!("URL Error: {}", reason),
                    _ => error!("Error: {}", e),
                }
                ResponseEnvelope::from(&e)
            }
        }
    }

    async fn process(&self, invocation: &InboundInvocation) -> Result<String> {
        let claims = invocation.claims().ok_or(Error::Unauthorized)?;
        info!(
            "Authenticated user: {}",
            claims.identity().unwrap_or("<unknown>")
        );

        let request = parse_body(invocation.body.as_deref())?;
        info!("Processing message: {}", request.message);

        let payload = UpstreamPayload::new(request.message, &self.generation);
        let response = self.client.generate(&payload).await?;

        response
            .generated_text
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::contract(MISSING_GENERATED_TEXT))
    }
}

fn parse_body(body: Option<&str>) -> Result<ChatRequest> {
    let body = body.ok_or_else(|| Error::malformed("request body is missing"))?;
    serde_json::from_str(body).map_err(|e| Error::malformed(e.to_string()))
}
