use ratings_service::config::AppConfig;
use ratings_service::http::router::build_router;
use ratings_service::sources::scraper::ScraperSource;
use ratings_service::store::postgres::PgRatingStore;
use ratings_service::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();

    let store = PgRatingStore::connect(&cfg).await?;
    store.migrate().await?;

    let source = Arc::new(ScraperSource::new(&cfg.scraper_host, cfg.scraper_timeout_ms));
    let state = AppState::new(Arc::new(store.clone()), source, cfg.rating_ttl());

    let app = build_router(state, &cfg.cors_origins);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        ttl_secs = cfg.rating_ttl_secs,
        scraper = %cfg.scraper_host,
        "listening on {}",
        cfg.bind_addr
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
