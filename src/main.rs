//! Library backend server binary

use std::net::SocketAddr;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_backend::{
    api,
    config::{AppConfig, LogFormat, LoggingConfig, StorageBackend},
    repository::Repository,
    services::{seed, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting library backend v{}", env!("CARGO_PKG_VERSION"));

    let repository = connect(&config).await?;
    tracing::info!(backend = ?repository.backend(), "Record store ready");
    let services = Services::new(repository);

    if config.seed.enabled {
        seed::load_defaults(&services)
            .await
            .context("failed to load seed data")?;
    }

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .context("invalid server host address")?,
        config.server.port,
    );

    let app = api::router(AppState::new(config, services));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("library_backend={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Build the repository for the configured storage backend
async fn connect(config: &AppConfig) -> anyhow::Result<Repository> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Repository::in_memory()),
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            tracing::info!("Database migrations completed");

            Ok(Repository::new(pool))
        }
    }
}
