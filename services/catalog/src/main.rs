use std::sync::Arc;

use song_catalog::{
    AppState, build_router,
    db::{Database, MemoryStore, SongStore, StoreKind},
    secrets::SECRET_MANAGER,
};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

async fn connect_store() -> anyhow::Result<Arc<dyn SongStore>> {
    match SECRET_MANAGER.store_kind()? {
        StoreKind::Postgres => {
            let database = Database::connect(
                &SECRET_MANAGER.database_url()?,
                SECRET_MANAGER.max_connections()?,
            )
            .await?;
            info!("📊 Connected to PostgreSQL database");

            database.migrate().await?;
            info!("📊 Database migrations completed");
            Ok(Arc::new(database))
        }
        StoreKind::Memory => {
            warn!("Using in-memory song store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let store = connect_store().await?;
    let app = build_router(AppState::new(store));

    let port = SECRET_MANAGER.port()?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("🎵 Song catalog listening on {}", listener.local_addr()?);
    info!("📡 Songs API: /api/songs, stats: /api/songs/stats");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
