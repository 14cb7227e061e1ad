//! Append-only activity log.
//!
//! Entries are kept in the order they were appended, which is both
//! chronological and display order. The log refuses an entry whose body is
//! identical to one already present, regardless of when it was logged or
//! which connection produced it.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Time label format in front of each line (`3:04:05 PM`).
pub const TIME_LABEL_FORMAT: &str = "%-I:%M:%S %p";

/// One immutable log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// When the entry was appended.
    pub logged_at: NaiveDateTime,
    /// Message text after the time label.
    pub body: String,
}

impl LogEntry {
    /// The bracketed time label, without the brackets.
    pub fn time_label(&self) -> String {
        self.logged_at.format(TIME_LABEL_FORMAT).to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time_label(), self.body)
    }
}

/// Ordered, append-only sequence of [`LogEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some entry already carries exactly `body`.
    pub fn contains_body(&self, body: &str) -> bool {
        self.entries.iter().any(|e| e.body == body)
    }

    /// Append `body` at `at` unless an identical body is already logged.
    ///
    /// Returns the new entry, or `None` if it was a duplicate.
    pub fn append_unique(&mut self, at: NaiveDateTime, body: String) -> Option<&LogEntry> {
        if self.contains_body(&body) {
            return None;
        }
        self.entries.push(LogEntry {
            logged_at: at,
            body,
        });
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries rendered as display lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
