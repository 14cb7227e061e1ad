//! # linedesk backend
//!
//! Single-operator telecom account dashboard service.
//!
//! ## Design Principles
//!
//! - **RAM only**: connections, reminder preferences and the activity log
//!   live in memory and are lost on restart
//! - **Nothing is sent**: overdue reminders are logged, not delivered
//! - **Live state per tick**: the reminder worker re-reads the store on every
//!   scan
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │  Dashboard  │────▶│  HTTP API   │────▶│      Store       │
//! │     UI      │◀────│  + SSE feed │◀────│ (linedesk_core)  │
//! └─────────────┘     └─────────────┘     └──────────────────┘
//!                                                  ▲
//!                                          ┌───────┴────────┐
//!                                          │ Reminder worker │
//!                                          │  (every 10 s)   │
//!                                          └────────────────┘
//! ```
//!
//! ## API Overview
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/health` | GET | Health check |
//! | `/v1/connections` | GET | List connections |
//! | `/v1/connections` | POST | Add connection |
//! | `/v1/connections/:id` | PUT | Replace connection |
//! | `/v1/selection` | GET | Selected connection |
//! | `/v1/selection` | POST | Select connection |
//! | `/v1/reminders` | POST | Save reminder preference |
//! | `/v1/notification` | GET | Current notification |
//! | `/v1/notification` | DELETE | Dismiss notification |
//! | `/v1/logs` | GET | Activity log |
//! | `/v1/theme/toggle` | POST | Toggle display theme |
//! | `/v1/dashboard` | GET | Full dashboard view |
//! | `/v1/events` | GET | SSE event stream |

pub mod clock;
pub mod config;
pub mod handlers;
pub mod models;
pub mod reminder;
pub mod seed;
pub mod store;

pub use config::Config;
pub use handlers::AppState;
pub use store::Store;

use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Maximum request body size (16 KiB).
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Build the Axum router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // API v1 endpoints
        .route(
            "/v1/connections",
            get(handlers::list_connections).post(handlers::add_connection),
        )
        .route("/v1/connections/:id", put(handlers::update_connection))
        .route(
            "/v1/selection",
            get(handlers::get_selection).post(handlers::select_connection),
        )
        .route("/v1/reminders", post(handlers::save_reminder))
        .route(
            "/v1/notification",
            get(handlers::get_notification).delete(handlers::dismiss_notification),
        )
        .route("/v1/logs", get(handlers::get_logs))
        .route("/v1/theme/toggle", post(handlers::toggle_theme))
        .route("/v1/dashboard", get(handlers::get_dashboard))
        .route("/v1/events", get(handlers::event_stream))
        // Middleware stack (order matters: first added = outermost)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
