//! Book Library Server
//!
//! REST API for managing a catalog of books and authors.

use std::net::SocketAddr;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use book_library::{
    api,
    config::{AppConfig, StorageBackend},
    logging,
    repository::Repository,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    logging::init(&config.logging);

    tracing::info!("Starting Book Library Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Connected to database");

            if config.database.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations completed");
            }

            Repository::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Repository::in_memory()
        }
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, repository);
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
