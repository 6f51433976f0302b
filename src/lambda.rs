use crate::{Error, Result, relay::Relay};
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Serves invocations from the Lambda runtime API until the runtime shuts down.
pub async fn run(relay: Arc<Relay>) -> Result<()> {
    info!("Starting Lambda runtime loop");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let relay = relay.clone();
        async move {
            info!("Handling invocation {}", event.context.request_id);
            Ok::<_, lambda_runtime::Error>(relay.handle_value(event.payload).await)
        }
    }))
    .await
    .map_err(|e| Error::Lambda(e.to_string()))
}
