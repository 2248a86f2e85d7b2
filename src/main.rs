use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stylist_api::{
    config::Config,
    create_router,
    db::{create_pool, create_redis_client, Cache, CacheWriterHandle},
    services::{
        catalog::{InMemoryCatalog, PgCatalog, ProductCatalog},
        tone::{InMemoryToneStore, RedisToneStore, ToneStore},
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stylist_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (cache, cache_handle): (Option<Cache>, Option<CacheWriterHandle>) =
        match config.redis_url.as_deref() {
            Some(url) => {
                let client = create_redis_client(url)?;
                let (cache, handle) = Cache::new(client).await;
                tracing::info!("Redis cache enabled");
                (Some(cache), Some(handle))
            }
            None => (None, None),
        };

    let catalog: Arc<dyn ProductCatalog> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = create_pool(url).await?;
            let catalog = PgCatalog::new(pool);
            match &cache {
                Some(cache) => Arc::new(catalog.with_cache(cache.clone(), config.catalog_cache_ttl_secs)),
                None => Arc::new(catalog),
            }
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving the in-memory demo catalog");
            Arc::new(InMemoryCatalog::seeded())
        }
    };

    let tones: Arc<dyn ToneStore> = match &cache {
        Some(cache) => Arc::new(RedisToneStore::new(cache.clone(), config.tone_ttl_secs)),
        None => Arc::new(InMemoryToneStore::new()),
    };

    tracing::info!(
        catalog = catalog.name(),
        diversity_cap = config.diversity_cap,
        signals = ?config.rank_signals,
        color_rule = ?config.color_rule,
        default_tone = %config.default_tone,
        "Engine configured"
    );

    let state = Arc::new(AppState::new(catalog, tones, &config));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
