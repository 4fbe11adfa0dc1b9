//! Signup HTTP server
//!
//! Main entry point for the user-registration API.

use std::{sync::Arc, time::Duration};

use application::UserService;
use infrastructure::{
    AppConfig, Argon2PasswordHasher, FaultProfile, SqliteUserStore, create_pool, init_telemetry,
};
use presentation_http::{FaultInjectionLayer, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first, telemetry second: the log sink location comes from the
    // config, so a load failure can only be reported after init.
    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _telemetry = init_telemetry(&config.log_index)?;

    if let Some(e) = config_err {
        warn!("Failed to load config, using defaults: {e}");
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    // Persistence and services
    let pool = create_pool(&config.database)?;
    let store = Arc::new(
        SqliteUserStore::new(Arc::new(pool)).with_force_rollback(config.database.force_rollback),
    );
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let user_service = UserService::new(store, hasher);

    let state = AppState {
        user_service: Arc::new(user_service),
        config: Arc::new(config.clone()),
    };

    // Compiled-in fault profile: 15% of non-exempt requests get a synthetic
    // failure, weighted across the six error kinds.
    let fault_injection = FaultInjectionLayer::new(FaultProfile::default())?;

    // Build router; the trace layer wraps the injector so injected responses
    // are logged like any other.
    let app = routes::create_router(state)
        .layer(fault_injection)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");
    info!("Interactive docs at http://{addr}/docs");

    let shutdown_timeout =
        Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown.
}
