use std::sync::Arc;

use anyhow::Context;

use moodbuddy_api::config::Config;
use moodbuddy_api::db::{self, PgStore};
use moodbuddy_api::services::catalog;
use moodbuddy_api::services::recommender::ActivityRecommender;
use moodbuddy_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodbuddy_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    let activities = match &config.activity_catalog_path {
        Some(path) => catalog::load_catalog(path)?,
        None => catalog::default_catalog(),
    };
    tracing::info!(activities = activities.len(), "Activity catalog loaded");

    // Database
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        config.clone(),
        ActivityRecommender::new(activities),
    );

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
