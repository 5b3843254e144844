//! Product Catalog API

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_products::{PgProductRepository, ProductService};
use migration::Migrator;
use products_api::{api, build_router, config::Config, state::AppState};
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState { db };

    let service = ProductService::new(PgProductRepository::new(state.db.clone()));
    let app = build_router(
        service,
        api::ready_router(state.clone()),
        config.server.cors_allowed_origin.as_deref(),
    )?;

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(()) => info!("Database connections closed"),
            Err(e) => warn!("Failed to close database connections: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Product Catalog API shutdown complete");
    Ok(())
}
