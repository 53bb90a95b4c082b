use std::sync::Arc;

use cinematch_api::{
    config::Config,
    db::{self, Cache},
    routes::{create_router, AppState},
    services::{CatalogStore, MetadataEnricher, RankingEngine, TmdbProvider},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Catalog and table are loaded once and shared read-only from here on
    let catalog = Arc::new(CatalogStore::new(db::load_catalog(&config.catalog_path)?));
    let table = Arc::new(db::load_similarity(&config.similarity_path)?);
    let engine = Arc::new(RankingEngine::new(catalog, table)?);

    let (cache, cache_handle) = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(db::create_redis_client(url)?);
            tracing::info!("Metadata cache enabled");
            (Some(cache), Some(handle))
        }
        None => (None, None),
    };

    let metadata: Arc<dyn MetadataEnricher> = Arc::new(TmdbProvider::from_config(&config, cache)?);
    let state = Arc::new(AppState::new(
        engine,
        metadata,
        config.recommendation_count,
    ));

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}
