//! ClubPortal API server
//!
//! Main application entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use ClubPortal::{
    config::Settings,
    database::{connection::DatabaseConfig, create_pool, run_migrations, ClubStore, DatabaseService, MemoryStore},
    routes::{create_routes, AppState},
    services::{GoTrueClient, ServiceFactory},
    session::{MemorySessionStorage, RedisSessionStorage, SessionManager, SessionStorage},
    utils::logging,
};

/// `database.url` value that selects the in-memory store
const MEMORY_DATABASE_URL: &str = "memory";
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);
const THROTTLE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ClubPortal::info());

    let store: Arc<dyn ClubStore> = if settings.database.url == MEMORY_DATABASE_URL {
        warn!("Using the in-memory store, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        info!("Connecting to database...");
        let pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;
        run_migrations(&pool).await?;
        Arc::new(DatabaseService::new(pool))
    };

    let session_storage: Arc<dyn SessionStorage> = match &settings.redis {
        Some(redis) => {
            info!("Connecting to Redis for session storage...");
            let storage = RedisSessionStorage::new(redis.clone()).await?;
            storage.test_connection().await?;
            Arc::new(storage)
        }
        None => {
            info!("Redis not configured, keeping sessions in memory");
            let storage = MemorySessionStorage::new();
            storage.spawn_cleanup(SESSION_CLEANUP_INTERVAL);
            Arc::new(storage)
        }
    };
    let sessions = SessionManager::new(session_storage, settings.auth.session_ttl_seconds)?;

    info!("Initializing services...");
    let identity = Arc::new(GoTrueClient::new(&settings.auth)?);
    let services = ServiceFactory::new(&settings, store, identity, sessions);
    services.login_throttle().spawn_cleanup(THROTTLE_CLEANUP_INTERVAL);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let app = create_routes(AppState::new(services, settings));

    let listener = TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ClubPortal has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
