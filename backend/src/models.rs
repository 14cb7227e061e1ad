//! API request/response models for the linedesk backend.
//!
//! Engine types live in `linedesk_core`; these are the shapes the
//! presentation layer sends and receives.

use chrono::{NaiveDate, NaiveDateTime};
use linedesk_core::{
    parse_date, ConnectionId, ConnectionRecord, ConnectionStatus, ContactMethod, LogEntry,
    NewConnection, Notification, NotificationKind, Theme,
};
use serde::{Deserialize, Serialize};

// === Connection Models ===

/// Connection as displayed, with derived usage figures
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionView {
    pub id: ConnectionId,
    pub connection_number: String,
    pub status: ConnectionStatus,
    pub balance: f64,
    pub data_remaining_mb: u64,
    pub data_total_mb: u64,
    pub data_used_mb: i64,
    pub data_remaining_gb: f64,
    pub data_used_gb: f64,
    pub data_total_gb: f64,
    /// Clamped to [0, 100] for the progress bar
    pub usage_percentage: f64,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl From<&ConnectionRecord> for ConnectionView {
    fn from(r: &ConnectionRecord) -> Self {
        Self {
            id: r.id,
            connection_number: r.connection_number.clone(),
            status: r.status,
            balance: r.balance,
            data_remaining_mb: r.data_remaining_mb,
            data_total_mb: r.data_total_mb,
            data_used_mb: r.data_used_mb(),
            data_remaining_gb: r.data_remaining_gb(),
            data_used_gb: r.data_used_gb(),
            data_total_gb: r.data_total_gb(),
            usage_percentage: r.display_usage_percentage(),
            start_date: r.start_date,
            due_date: r.due_date,
            expiry_date: r.expiry_date,
        }
    }
}

/// Admin form body for add and edit
///
/// Dates arrive as `YYYY-MM-DD` strings, as the form produces them.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionForm {
    pub connection_number: String,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(default, deserialize_with = "form_number::deserialize")]
    pub balance: f64,
    #[serde(default, deserialize_with = "form_number::deserialize")]
    pub data_remaining_mb: u64,
    #[serde(default, deserialize_with = "form_number::deserialize")]
    pub data_total_mb: u64,
    pub start_date: String,
    pub due_date: String,
    pub expiry_date: String,
}

impl ConnectionForm {
    /// Coerce form values into engine input
    pub fn into_new_connection(self) -> linedesk_core::Result<NewConnection> {
        Ok(NewConnection {
            start_date: parse_date(&self.start_date)?,
            due_date: parse_date(&self.due_date)?,
            expiry_date: parse_date(&self.expiry_date)?,
            connection_number: self.connection_number,
            status: self.status,
            balance: self.balance,
            data_remaining_mb: self.data_remaining_mb,
            data_total_mb: self.data_total_mb,
        })
    }
}

/// Numeric form fields arrive as JSON numbers or as the raw text of an
/// input box. Blank text counts as zero.
mod form_number {
    use serde::{de::Error, Deserialize, Deserializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr + Default,
        T::Err: Display,
    {
        match Raw::<T>::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(text) if text.trim().is_empty() => Ok(T::default()),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map_err(|e| D::Error::custom(format!("invalid number {text:?}: {e}"))),
        }
    }
}

/// List connections response
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<ConnectionView>,
}

/// Add connection response
#[derive(Debug, Serialize)]
pub struct AddConnectionResponse {
    pub id: ConnectionId,
}

/// Update connection response
#[derive(Debug, Serialize)]
pub struct UpdateConnectionResponse {
    pub success: bool,
}

// === Selection ===

/// Select connection request
///
/// The id is not validated; unknown ids resolve to the first connection.
#[derive(Debug, Deserialize)]
pub struct SelectConnectionRequest {
    pub connection_id: String,
}

/// Selected connection response
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub connection: ConnectionView,
}

// === Reminders ===

/// Save reminder preference request
#[derive(Debug, Deserialize)]
pub struct SaveReminderRequest {
    pub connection_id: String,
    pub contact: String,
    #[serde(default)]
    pub method: ContactMethod,
}

/// Save reminder preference response
#[derive(Debug, Serialize)]
pub struct SaveReminderResponse {
    pub success: bool,
    pub notification: NotificationView,
}

// === Notification ===

/// Visible notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: NaiveDateTime,
}

impl From<&Notification> for NotificationView {
    fn from(n: &Notification) -> Self {
        Self {
            kind: n.kind,
            message: n.message.clone(),
            shown_at: n.shown_at,
        }
    }
}

/// Current notification response
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub notification: Option<NotificationView>,
}

/// Dismiss notification response
#[derive(Debug, Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

// === Activity Log ===

/// Activity log line
#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub logged_at: NaiveDateTime,
    pub body: String,
    /// `[time] body` as displayed
    pub line: String,
}

impl From<&LogEntry> for LogLine {
    fn from(e: &LogEntry) -> Self {
        Self {
            logged_at: e.logged_at,
            body: e.body.clone(),
            line: e.to_string(),
        }
    }
}

/// Activity log response
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub entries: Vec<LogLine>,
}

// === Theme / Dashboard ===

/// Theme response
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// Everything the dashboard page renders in one response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub connections: Vec<ConnectionView>,
    pub selected: Option<ConnectionView>,
    pub notification: Option<NotificationView>,
    pub logs: Vec<LogLine>,
    pub theme: Theme,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

// === SSE Event Models ===

/// Event pushed to dashboard subscribers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The reminder scan appended a log line
    LogAppended(LogLine),
    /// A notification was raised
    Notification(NotificationView),
    /// The notification was dismissed or cleared
    NotificationCleared,
    /// A connection was added or edited
    ConnectionsChanged { count: usize },
}
