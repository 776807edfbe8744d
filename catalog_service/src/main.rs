use std::sync::Arc;

use anyhow::Context;
use catalog_db_migrator::CATALOG_DB_MIGRATIONS;
use catalog_entrypoint::CatalogEntrypoint;
use catalog_service::{
    domain::services::CatalogServiceImpl,
    inbound::http::{CatalogRouterState, app},
    outbound::CatalogPgStorage,
};
use config::Config;
use sqlx::postgres::PgPoolOptions;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let entrypoint = CatalogEntrypoint::default().init();

    // Parse our configuration from the environment.
    let config = Config::from_env(entrypoint.environment())
        .context("expected to be able to generate config")?;

    tracing::info!("initialized config");

    let (min_connections, max_connections) = config.pool_bounds();
    let db = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect(&config.database_url)
        .await
        .context("could not connect to catalog db")?;

    tracing::info!(
        min_connections,
        max_connections,
        "initialized catalog db connection"
    );

    CATALOG_DB_MIGRATIONS
        .run(&db)
        .await
        .context("could not run catalog migrations")?;

    tracing::info!("applied catalog migrations");

    let storage = CatalogPgStorage::new(db);
    let service = Arc::new(CatalogServiceImpl::new(storage.clone(), storage));
    let app = app(CatalogRouterState::new(service.clone(), service));

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to address {}", bind_address))?;

    tracing::info!(
        "catalog service is up and running with environment {} on port {}",
        config.environment,
        config.port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error running axum server")
}
