use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recs_api::{
    catalog::CatalogStore,
    config::Config,
    routes::{create_router, AppState},
    services::{providers::TmdbProvider, PosterFetcher, RecommendationEngine},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recs_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The service cannot run without its catalog.
    let catalog = CatalogStore::load(&config.movie_list_path, &config.similarity_path)
        .context("Failed to load movie catalog")?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
        config.poster_timeout(),
    )?;
    let posters = PosterFetcher::new(Arc::new(provider))
        .with_concurrency(config.poster_concurrency)
        .with_timeout(config.poster_timeout());

    let engine = RecommendationEngine::new(Arc::new(catalog), posters);
    let app = create_router(Arc::new(AppState::new(engine)));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
