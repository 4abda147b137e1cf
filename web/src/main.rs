//! EventSphere HTTP server.
//!
//! Campus event listing and registration with cookie-session authentication
//! and an in-memory store (all data is lost on restart by design).

use eventsphere_core::{MemoryStore, RegistrationService, SessionStore};
use eventsphere_web::config::Config;
use eventsphere_web::{AppState, build_router};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("eventsphere={},tower_http=debug", config.server.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EventSphere HTTP server");

    // Construct the stores explicitly and inject them; no globals
    let store = Arc::new(MemoryStore::new());
    if config.auth.seed_sample_data {
        store.seed_sample_data().await?;
        info!("Sample accounts seeded (manager/student)");
    }

    let sessions = Arc::new(SessionStore::new());
    spawn_session_purger(Arc::clone(&sessions));

    let registration = Arc::new(RegistrationService::new(Arc::clone(&store)));

    let state = AppState::new(
        store,
        sessions,
        registration,
        chrono::Duration::seconds(config.auth.session_ttl_secs),
    );

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Sweep expired sessions hourly; they are also dropped lazily on access.
fn spawn_session_purger(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            if let Ok(purged) = sessions.purge_expired().await {
                if purged > 0 {
                    debug!(purged, "expired sessions removed");
                }
            }
        }
    });
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
