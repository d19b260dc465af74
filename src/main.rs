use std::sync::Arc;

use gamerec_api::{
    config::Config,
    db::{create_pool, PgGameRepository},
    routes::{create_router, AppState},
    services::{load_recommendation_system, DefaultFeatureBuilder, RecommendationEngine},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gamerec_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Artifacts are loaded once and shared read-only by every request
    let system = Arc::new(load_recommendation_system(&config.artifacts_dir)?);

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let repository = Arc::new(PgGameRepository::new(pool));

    let engine = RecommendationEngine::new(
        repository.clone(),
        system,
        Arc::new(DefaultFeatureBuilder),
        config.query_timeout(),
    );

    let state = Arc::new(AppState {
        engine,
        repository,
        default_recommendations: config.default_recommendations,
        max_recommendations: config.max_recommendations,
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
