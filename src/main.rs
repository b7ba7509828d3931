use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use muslib::{Database, build_router, secrets::Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::DEBUG.into()))
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("Invalid configuration")?;

    let database = Database::connect(&settings.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("📊 Connected to song database");

    database
        .migrate()
        .await
        .context("Failed to create songs table")?;
    info!("📊 Database migrations completed");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port))
        .await
        .with_context(|| format!("Failed to bind port {}", settings.port))?;

    let app = build_router(database, settings.request_timeout);

    info!("🎵 muslib listening on port {}", settings.port);
    info!("📡 Song API endpoints: /muslib/*, /search/*, /page/*");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
