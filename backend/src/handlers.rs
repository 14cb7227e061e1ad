//! HTTP request handlers for the linedesk dashboard API.
//!
//! Handlers are the presentation boundary: they coerce form input (dates,
//! ids), reject blank reminder contacts, and otherwise pass straight through
//! to the [`Store`]. No business rules live here.

use crate::models::*;
use crate::store::Store;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::stream::Stream;
use linedesk_core::ConnectionId;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

// === Health Check ===

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// === Connections ===

/// GET /v1/connections - All connections in insertion order
pub async fn list_connections(State(state): State<AppState>) -> Json<ConnectionsResponse> {
    let connections = state
        .store
        .list_connections()
        .await
        .iter()
        .map(ConnectionView::from)
        .collect();

    Json(ConnectionsResponse { connections })
}

/// POST /v1/connections - Register a connection from the admin form
///
/// The new connection becomes the selection.
pub async fn add_connection(
    State(state): State<AppState>,
    body: Result<Json<ConnectionForm>, JsonRejection>,
) -> Result<Json<AddConnectionResponse>, ApiError> {
    let Json(form) = body?;
    let new = form.into_new_connection()?;
    let connection_number = new.connection_number.clone();

    let id = state.store.add_connection(new).await;

    info!(connection_id = %id, connection_number = %connection_number, "Connection added");

    Ok(Json(AddConnectionResponse { id }))
}

/// PUT /v1/connections/:id - Replace a connection from the admin form
pub async fn update_connection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ConnectionForm>, JsonRejection>,
) -> Result<Json<UpdateConnectionResponse>, ApiError> {
    let Json(form) = body?;
    let id: ConnectionId = id.parse().map_err(|_| ApiError::ConnectionNotFound)?;
    let record = form.into_new_connection()?.with_id(id);

    state.store.update_connection(record).await?;

    info!(connection_id = %id, "Connection updated");

    Ok(Json(UpdateConnectionResponse { success: true }))
}

// === Selection ===

/// GET /v1/selection - The selected connection (first one as fallback)
pub async fn get_selection(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let record = state
        .store
        .selected_connection()
        .await
        .ok_or(ApiError::NoConnections)?;

    Ok(Json(SelectionResponse {
        connection: ConnectionView::from(&record),
    }))
}

/// POST /v1/selection - Select a connection
///
/// Ids that match nothing (including malformed ones) are accepted and
/// resolve to the first connection.
pub async fn select_connection(
    State(state): State<AppState>,
    body: Result<Json<SelectConnectionRequest>, JsonRejection>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let Json(req) = body?;
    let id = req.connection_id.parse().unwrap_or_else(|_| {
        debug!("Unparseable connection id selected, falling back");
        ConnectionId::UNASSIGNED
    });

    let record = state
        .store
        .select_connection(id)
        .await
        .ok_or(ApiError::NoConnections)?;

    Ok(Json(SelectionResponse {
        connection: ConnectionView::from(&record),
    }))
}

// === Reminders ===

/// POST /v1/reminders - Save reminder preference for a connection
///
/// Overwrites any earlier preference for the same connection.
pub async fn save_reminder(
    State(state): State<AppState>,
    body: Result<Json<SaveReminderRequest>, JsonRejection>,
) -> Result<Json<SaveReminderResponse>, ApiError> {
    let Json(req) = body?;
    let id: ConnectionId = req
        .connection_id
        .parse()
        .map_err(|_| ApiError::InvalidInput("invalid connection_id"))?;

    if req.contact.trim().is_empty() {
        warn!(connection_id = %id, "Reminder rejected: empty contact");
        return Err(ApiError::InvalidInput("contact is required"));
    }

    let confirmation = state
        .store
        .save_reminder_preference(id, req.contact, req.method)
        .await;

    info!(connection_id = %id, method = %req.method, "Reminder preference saved");

    Ok(Json(SaveReminderResponse {
        success: true,
        notification: NotificationView::from(&confirmation),
    }))
}

// === Notification ===

/// GET /v1/notification - Current notification, if still visible
pub async fn get_notification(State(state): State<AppState>) -> Json<NotificationResponse> {
    let notification = state.store.notification().await;

    Json(NotificationResponse {
        notification: notification.as_ref().map(NotificationView::from),
    })
}

/// DELETE /v1/notification - Dismiss the notification early
pub async fn dismiss_notification(State(state): State<AppState>) -> Json<DismissResponse> {
    let dismissed = state.store.dismiss_notification().await;
    Json(DismissResponse { dismissed })
}

// === Activity Log ===

/// GET /v1/logs - Activity log, oldest first
pub async fn get_logs(State(state): State<AppState>) -> Json<LogsResponse> {
    let entries = state
        .store
        .log_entries()
        .await
        .iter()
        .map(LogLine::from)
        .collect();

    Json(LogsResponse { entries })
}

// === Theme / Dashboard ===

/// POST /v1/theme/toggle - Flip light/dark
pub async fn toggle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.store.toggle_theme().await;
    debug!(theme = ?theme, "Theme toggled");
    Json(ThemeResponse { theme })
}

/// GET /v1/dashboard - Everything the dashboard page renders
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    Json(state.store.dashboard_view().await)
}

// === SSE Event Stream ===

/// GET /v1/events - Server-Sent Events stream of dashboard changes
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client connected");

    let rx = state.store.subscribe();

    // Lagged receivers skip the missed events
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(_) => None,
        },
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

// === Error Handling ===

/// API error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("connection not found")]
    ConnectionNotFound,
    #[error("no connections registered")]
    NoConnections,
}

impl From<linedesk_core::Error> for ApiError {
    fn from(err: linedesk_core::Error) -> Self {
        match err {
            linedesk_core::Error::ConnectionNotFound(_) => ApiError::ConnectionNotFound,
            linedesk_core::Error::InvalidDate { input } => ApiError::InvalidDate(input),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Request body rejected");
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            ApiError::InvalidInput(_) | ApiError::InvalidDate(_) | ApiError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT")
            }
            ApiError::ConnectionNotFound => (StatusCode::NOT_FOUND, "CONNECTION_NOT_FOUND"),
            ApiError::NoConnections => (StatusCode::NOT_FOUND, "NO_CONNECTIONS"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code,
        });

        (status, body).into_response()
    }
}
