//! linedesk backend - account dashboard service
//!
//! - Keeps connections, reminder preferences and the activity log in RAM
//! - Scans for overdue bills on a fixed interval and logs reminder notices
//! - Serves the dashboard API and a live SSE feed

use linedesk_backend::{
    build_router, config::Config, reminder::ReminderWorker, seed, AppState, Store,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize structured logging
    init_tracing();

    let config = Config::from_env();
    log_startup_info(&config);

    // Initialize core components
    let store = Arc::new(Store::new(&config));
    if config.seed_demo_data {
        seed::seed_store(&store).await;
    }

    // Start background worker
    let worker = ReminderWorker::new(store.clone(), config.reminder_scan_interval).start();

    // Build and serve the application
    let app = build_router(AppState::new(store));
    serve(app, &config).await;

    worker.stop().await;
    info!("Shutdown complete");
}

/// Initialize tracing with environment-based log levels.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linedesk_backend=debug,tower_http=info")),
        )
        .init();
}

/// Log startup configuration.
fn log_startup_info(config: &Config) {
    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        storage = "memory",
        scan_interval_secs = config.reminder_scan_interval.as_secs(),
        notification_display_secs = config.notification_display.as_secs(),
        seed_demo_data = config.seed_demo_data,
        "Starting linedesk backend"
    );
}

/// Bind to address and serve until Ctrl-C.
async fn serve(app: axum::Router, config: &Config) {
    let bind_addr = format!("{}:{}", config.bind_addr, config.port);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %bind_addr, error = %e, "Failed to bind to address");
            return;
        }
    };

    info!(addr = %bind_addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
