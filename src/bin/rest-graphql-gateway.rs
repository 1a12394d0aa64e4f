use anyhow::Result;
use clap::Parser;
use rest_graphql_gateway::{Config, Gateway};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.default_log_filter())),
        )
        .compact()
        .init();

    info!(
        api = %config.api_url,
        store = %config.store_code,
        environment = ?config.environment,
        "Starting REST gateway"
    );

    Gateway::builder()
        .with_config(config)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
