//! Dashboard controller.
//!
//! [`Dashboard`] owns all engine state and is the only way the presentation
//! layer mutates it. Operations that take `now` expect local wall-clock time;
//! the controller never reads a clock itself.
//!
//! Selecting a connection, adding one, or editing the selected one
//! recomputes the advisory for the (resolved) selection. Saving a reminder
//! preference raises a confirmation instead. Both share the single
//! notification slot, so whichever happened last is what the operator sees.

use crate::activity_log::{ActivityLog, LogEntry};
use crate::advisory::check_advisory;
use crate::connection::{ConnectionId, ConnectionRecord, NewConnection};
use crate::error::Result;
use crate::notification::{Notification, NotificationKind, NotificationSlot};
use crate::registry::Registry;
use crate::reminder::{confirmation_message, ContactMethod, ReminderBook, ReminderPreference};
use crate::scanner::scan_overdue;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display theme toggled by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Registry, reminder preferences, activity log and notification state.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    registry: Registry,
    reminders: ReminderBook,
    log: ActivityLog,
    notification: NotificationSlot,
    theme: Theme,
}

impl Dashboard {
    /// Empty dashboard with the default notification display time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty dashboard whose notifications stay visible for `display_for`.
    pub fn with_notification_duration(display_for: Duration) -> Self {
        Self {
            notification: NotificationSlot::new(display_for),
            ..Self::default()
        }
    }

    // === Connections ===

    /// All connections in insertion order.
    pub fn list_connections(&self) -> &[ConnectionRecord] {
        self.registry.list()
    }

    /// Look up one connection.
    pub fn connection(&self, id: &ConnectionId) -> Option<&ConnectionRecord> {
        self.registry.get(id)
    }

    /// The selected connection, falling back to the first one.
    pub fn selected_connection(&self) -> Option<&ConnectionRecord> {
        self.registry.selected()
    }

    /// Select a connection.
    ///
    /// The advisory is recomputed only when the resolved selection changes,
    /// so re-selecting the shown connection keeps a dismissed advisory gone.
    pub fn select_connection(&mut self, id: ConnectionId, now: NaiveDateTime) {
        let before = self.registry.selected().map(|r| r.id);
        self.registry.select(id);

        if self.registry.selected().map(|r| r.id) != before {
            self.refresh_advisory(now);
        }
    }

    /// Register a connection, select it and recompute the advisory.
    pub fn add_connection(&mut self, new: NewConnection, now: NaiveDateTime) -> ConnectionId {
        let id = self.registry.add(new);
        self.refresh_advisory(now);
        id
    }

    /// Replace a connection by id.
    ///
    /// The advisory is recomputed only when the edited record is the one
    /// currently shown.
    pub fn update_connection(&mut self, record: ConnectionRecord, now: NaiveDateTime) -> Result<()> {
        let id = record.id;
        self.registry.update(record)?;

        if self.registry.selected().map(|r| r.id) == Some(id) {
            self.refresh_advisory(now);
        }
        Ok(())
    }

    fn refresh_advisory(&mut self, now: NaiveDateTime) {
        let advisory = self
            .registry
            .selected()
            .and_then(|record| check_advisory(record, now.date()));

        match advisory {
            Some(advisory) => {
                self.notification
                    .show(NotificationKind::Advisory, advisory.to_string(), now);
            }
            None => self.notification.clear(),
        }
    }

    // === Reminders ===

    /// Save (or overwrite) the reminder preference for `id` and confirm it.
    ///
    /// The contact is stored as given; rejecting blank contacts is the
    /// caller's job.
    pub fn save_reminder_preference(
        &mut self,
        id: ConnectionId,
        contact: String,
        method: ContactMethod,
        now: NaiveDateTime,
    ) -> &Notification {
        self.reminders.upsert(id, contact, method, now);

        let number = self
            .registry
            .get(&id)
            .or_else(|| self.registry.selected())
            .map(|r| r.connection_number.as_str())
            .unwrap_or_default();
        let message = match self.reminders.get(&id) {
            Some(pref) => confirmation_message(number, pref),
            None => String::new(),
        };

        self.notification
            .show(NotificationKind::Confirmation, message, now)
    }

    /// The saved preference for `id`.
    pub fn reminder_preference(&self, id: &ConnectionId) -> Option<&ReminderPreference> {
        self.reminders.get(id)
    }

    /// Number of connections with a saved preference.
    pub fn reminder_count(&self) -> usize {
        self.reminders.len()
    }

    /// Run one overdue scan against the current state.
    ///
    /// Returns the log entries appended by this scan.
    pub fn run_overdue_scan(&mut self, now: NaiveDateTime) -> Vec<LogEntry> {
        scan_overdue(&self.registry, &self.reminders, &mut self.log, now)
    }

    /// Log entries, oldest first.
    pub fn log_entries(&self) -> &[LogEntry] {
        self.log.entries()
    }

    /// Log entries rendered for display, oldest first.
    pub fn log_lines(&self) -> Vec<String> {
        self.log.lines()
    }

    // === Notification ===

    /// The visible notification at `now`.
    pub fn notification(&self, now: NaiveDateTime) -> Option<&Notification> {
        self.notification.current(now)
    }

    /// Dismiss the notification early. Returns whether one was showing.
    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.dismiss()
    }

    /// Forget a timed-out notification.
    pub fn expire_notification(&mut self, now: NaiveDateTime) -> bool {
        self.notification.expire(now)
    }

    // === Theme ===

    /// Current display theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the display theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
