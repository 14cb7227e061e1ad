//! Live dashboard state shared by handlers and the reminder worker.
//!
//! Wraps the engine's [`Dashboard`] in an async lock. Every method reads the
//! clock and the state at call time, so the worker always scans the current
//! connections and preferences rather than a copy taken at startup.
//! No persistence - data is lost on restart.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::models::{ConnectionView, DashboardEvent, DashboardResponse, LogLine, NotificationView};
use chrono::NaiveDateTime;
use linedesk_core::{
    ConnectionId, ConnectionRecord, ContactMethod, Dashboard, LogEntry, NewConnection,
    Notification, Theme,
};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Broadcast channel capacity for SSE events
const BROADCAST_CAPACITY: usize = 256;

/// Thread-safe in-memory store
pub struct Store {
    /// Engine state
    dashboard: RwLock<Dashboard>,

    /// Time source, read per operation
    clock: Arc<dyn Clock>,

    /// Live event feed for SSE subscribers
    events: broadcast::Sender<DashboardEvent>,

    /// Metrics (aggregate only)
    metrics: RwLock<StoreMetrics>,
}

/// Aggregate counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetrics {
    pub total_scans: u64,
    pub total_log_entries: u64,
    pub total_connections_added: u64,
    pub total_reminders_saved: u64,
}

impl Store {
    /// Create an empty store on the system clock
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty store on the given clock
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            dashboard: RwLock::new(Dashboard::with_notification_duration(
                config.notification_display_chrono(),
            )),
            clock,
            events,
            metrics: RwLock::new(StoreMetrics::default()),
        }
    }

    /// Current local time according to the store's clock
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Subscribe to live dashboard events
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn publish_notification(&self, dashboard: &Dashboard, now: NaiveDateTime) {
        match dashboard.notification(now) {
            Some(n) => self.publish(DashboardEvent::Notification(n.into())),
            None => self.publish(DashboardEvent::NotificationCleared),
        }
    }

    // === Connections ===

    pub async fn list_connections(&self) -> Vec<ConnectionRecord> {
        self.dashboard.read().await.list_connections().to_vec()
    }

    pub async fn connection(&self, id: &ConnectionId) -> Option<ConnectionRecord> {
        self.dashboard.read().await.connection(id).cloned()
    }

    /// Resolved selection (falls back to the first connection)
    pub async fn selected_connection(&self) -> Option<ConnectionRecord> {
        self.dashboard.read().await.selected_connection().cloned()
    }

    /// Select a connection; returns what the selection resolves to
    pub async fn select_connection(&self, id: ConnectionId) -> Option<ConnectionRecord> {
        let now = self.now();
        let mut dashboard = self.dashboard.write().await;
        dashboard.select_connection(id, now);
        self.publish_notification(&dashboard, now);

        let resolved = dashboard.selected_connection().cloned();
        debug!(
            requested = %id,
            resolved = ?resolved.as_ref().map(|r| r.id),
            "Selected connection"
        );
        resolved
    }

    /// Register a new connection; it becomes the selection
    pub async fn add_connection(&self, new: NewConnection) -> ConnectionId {
        let now = self.now();
        let mut dashboard = self.dashboard.write().await;
        let id = dashboard.add_connection(new, now);

        self.publish(DashboardEvent::ConnectionsChanged {
            count: dashboard.list_connections().len(),
        });
        self.publish_notification(&dashboard, now);
        drop(dashboard);

        self.metrics.write().await.total_connections_added += 1;
        debug!(connection_id = %id, "Added connection");
        id
    }

    /// Replace a connection by id
    pub async fn update_connection(&self, record: ConnectionRecord) -> linedesk_core::Result<()> {
        let now = self.now();
        let id = record.id;
        let mut dashboard = self.dashboard.write().await;
        let shown_before = dashboard.notification(now).cloned();

        dashboard.update_connection(record, now)?;

        self.publish(DashboardEvent::ConnectionsChanged {
            count: dashboard.list_connections().len(),
        });
        if dashboard.notification(now) != shown_before.as_ref() {
            self.publish_notification(&dashboard, now);
        }

        debug!(connection_id = %id, "Updated connection");
        Ok(())
    }

    // === Reminders ===

    /// Save a reminder preference; returns the confirmation notification
    pub async fn save_reminder_preference(
        &self,
        id: ConnectionId,
        contact: String,
        method: ContactMethod,
    ) -> Notification {
        let now = self.now();
        let mut dashboard = self.dashboard.write().await;
        let confirmation = dashboard
            .save_reminder_preference(id, contact, method, now)
            .clone();
        drop(dashboard);

        self.publish(DashboardEvent::Notification((&confirmation).into()));
        self.metrics.write().await.total_reminders_saved += 1;
        debug!(connection_id = %id, method = %method, "Saved reminder preference");
        confirmation
    }

    /// Run one overdue scan against live state
    ///
    /// Returns the log entries this scan appended.
    pub async fn run_overdue_scan(&self) -> Vec<LogEntry> {
        let now = self.now();
        let mut dashboard = self.dashboard.write().await;
        let appended = dashboard.run_overdue_scan(now);
        let expired = dashboard.expire_notification(now);
        drop(dashboard);

        for entry in &appended {
            self.publish(DashboardEvent::LogAppended(entry.into()));
        }
        if expired {
            self.publish(DashboardEvent::NotificationCleared);
        }

        let mut metrics = self.metrics.write().await;
        metrics.total_scans += 1;
        metrics.total_log_entries += appended.len() as u64;

        appended
    }

    pub async fn log_entries(&self) -> Vec<LogEntry> {
        self.dashboard.read().await.log_entries().to_vec()
    }

    // === Notification ===

    pub async fn notification(&self) -> Option<Notification> {
        let now = self.now();
        self.dashboard.read().await.notification(now).cloned()
    }

    pub async fn dismiss_notification(&self) -> bool {
        let dismissed = self.dashboard.write().await.dismiss_notification();
        if dismissed {
            self.publish(DashboardEvent::NotificationCleared);
        }
        dismissed
    }

    // === Theme ===

    pub async fn theme(&self) -> Theme {
        self.dashboard.read().await.theme()
    }

    pub async fn toggle_theme(&self) -> Theme {
        self.dashboard.write().await.toggle_theme()
    }

    /// Consistent view of everything the dashboard page renders
    pub async fn dashboard_view(&self) -> DashboardResponse {
        let now = self.now();
        let dashboard = self.dashboard.read().await;
        DashboardResponse {
            connections: dashboard
                .list_connections()
                .iter()
                .map(ConnectionView::from)
                .collect(),
            selected: dashboard.selected_connection().map(ConnectionView::from),
            notification: dashboard.notification(now).map(NotificationView::from),
            logs: dashboard.log_entries().iter().map(LogLine::from).collect(),
            theme: dashboard.theme(),
        }
    }

    /// Get aggregate metrics
    pub async fn get_metrics(&self) -> StoreMetrics {
        *self.metrics.read().await
    }
}
