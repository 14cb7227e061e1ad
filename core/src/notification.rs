//! The single transient notification shown to the operator.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// How long a notification stays visible unless dismissed earlier.
pub const NOTIFICATION_DISPLAY_SECS: i64 = 8;

/// What raised the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Due date or expiry proximity for the selected connection.
    Advisory,
    /// Acknowledgement of a saved reminder preference.
    Confirmation,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Source of the notification.
    pub kind: NotificationKind,
    /// Text shown to the operator.
    pub message: String,
    /// When it was raised.
    pub shown_at: NaiveDateTime,
}

/// Holds at most one notification; a new one supersedes the old.
#[derive(Debug, Clone)]
pub struct NotificationSlot {
    current: Option<Notification>,
    display_for: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(Duration::seconds(NOTIFICATION_DISPLAY_SECS))
    }
}

impl NotificationSlot {
    /// Create an empty slot with the given display duration.
    pub fn new(display_for: Duration) -> Self {
        Self {
            current: None,
            display_for,
        }
    }

    /// Show a notification, replacing whatever was there.
    pub fn show(&mut self, kind: NotificationKind, message: String, now: NaiveDateTime) -> &Notification {
        self.current.insert(Notification {
            kind,
            message,
            shown_at: now,
        })
    }

    /// Remove the notification, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Operator dismissal. Returns whether a notification was removed.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// The visible notification at `now`, if it has not timed out.
    pub fn current(&self, now: NaiveDateTime) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now - n.shown_at < self.display_for)
    }

    /// Drop a timed-out notification. Returns whether one was dropped.
    pub fn expire(&mut self, now: NaiveDateTime) -> bool {
        if self.current.is_some() && self.current(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }
}
