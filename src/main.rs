use anyhow::Result;
use chat_relay::{config, lambda, relay::Relay, server, upstream::HttpUpstreamClient};
use std::sync::Arc;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .json()
        .init();

    info!(
        "Starting chat relay for {} with log level: {}",
        config.upstream.url, log_level
    );

    let client = HttpUpstreamClient::new(&config.upstream)?;
    let relay = Arc::new(Relay::new(
        Arc::new(client),
        config.upstream.generation.clone(),
    ));

    if std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        lambda::run(relay).await?;
    } else {
        server::run(&config.server, relay).await?;
    }

    Ok(())
}
