use anyhow::Context;

use inkpost_infra::{AppConfig, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inkpost_observability::init();

    let config_dir = config::default_config_dir()?;
    let cfg = AppConfig::load(&config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir.display()))?;
    tracing::info!(config_dir = %config_dir.display(), "configuration loaded");

    let app = inkpost_api::app::build_from_config(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
