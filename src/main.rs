use std::sync::Arc;
use std::time::Duration;

use landing_gateway::app::{app, AppState};
use landing_gateway::config;
use landing_gateway::database::manager;
use landing_gateway::database::store::PgDomainStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    tracing::info!(
        environment = ?config.environment,
        base_domain = %config.routing.base_domain,
        "starting landing gateway"
    );

    let pool = manager::connect().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(config, Arc::new(PgDomainStore::new(pool)));

    // Sweep expired resolution-cache entries so idle hostnames do not pile up.
    let resolver = state.resolver.clone();
    let sweep_every = Duration::from_secs(config.routing.cache_ttl_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let purged = resolver.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "swept expired resolution cache entries");
            }
        }
    });

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "landing gateway listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
