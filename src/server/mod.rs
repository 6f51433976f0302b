pub mod handlers;

use crate::{Result, config::ServerConfig, relay::Relay};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const INVOKE_PATH: &str = "/2015-03-31/functions/function/invocations";

pub fn router(relay: Arc<Relay>) -> Router {
    let app_state = handlers::AppState { relay };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(INVOKE_PATH, post(handlers::invoke))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: &ServerConfig, relay: Arc<Relay>) -> Result<()> {
    let app = router(relay);

    let addr = SocketAddr::new(config.host.parse()?, config.port);

    info!("Starting local invocation server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
