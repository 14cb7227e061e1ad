//! Overdue scan across every connection with a reminder preference.
//!
//! The scan is a pure function of the state handed to it, so callers that
//! run it periodically must pass the state as it is at tick time.

use crate::activity_log::{ActivityLog, LogEntry};
use crate::connection::ConnectionRecord;
use crate::registry::Registry;
use crate::reminder::{overdue_message, ReminderBook};
use chrono::NaiveDateTime;

/// Strictly past the start of the due date.
pub fn is_overdue(record: &ConnectionRecord, now: NaiveDateTime) -> bool {
    record.due_instant() < now
}

/// Log an overdue notice for each connection with a preference whose due
/// date has passed.
///
/// Connections are visited in registry order. Returns the entries appended
/// by this call; notices already in the log are skipped.
pub fn scan_overdue(
    registry: &Registry,
    reminders: &ReminderBook,
    log: &mut ActivityLog,
    now: NaiveDateTime,
) -> Vec<LogEntry> {
    let mut appended = Vec::new();

    for record in registry.list() {
        let pref = match reminders.get(&record.id) {
            Some(p) => p,
            None => continue,
        };
        if !is_overdue(record, now) {
            continue;
        }

        let body = overdue_message(&record.connection_number, pref);
        if let Some(entry) = log.append_unique(now, body) {
            appended.push(entry.clone());
        }
    }

    appended
}
