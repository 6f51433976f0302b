use crate::{
    Error,
    relay::{Relay, ResponseEnvelope},
};
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Accepts a raw invocation event and answers with the envelope, like the
/// Lambda invoke API does.
pub async fn invoke(State(state): State<AppState>, body: Bytes) -> Json<ResponseEnvelope> {
    info!("Received local invocation ({} bytes)", body.len());

    let envelope = match serde_json::from_slice::<Value>(&body) {
        Ok(event) => state.relay.handle_value(event).await,
        Err(e) => {
            error!("Failed to decode invocation event: {}", e);
            ResponseEnvelope::from(&Error::malformed(e.to_string()))
        }
    };

    Json(envelope)
}
