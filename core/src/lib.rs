//! linedesk core - connection registry and reminder engine.
//!
//! This library holds the behaviour behind the linedesk account dashboard:
//! - An in-memory registry of connection (subscription) records with a
//!   selected record
//! - A due-date / expiry proximity advisory for the selected connection
//! - Reminder contact preferences per connection
//! - A periodic overdue scan that appends deduplicated activity log lines
//!
//! # Constraints
//!
//! This library intentionally does NOT:
//! - Read the clock (callers pass `now` in)
//! - Spawn tasks or timers
//! - Deliver email or SMS
//! - Persist anything
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Local};
//! use linedesk_core::{ContactMethod, ConnectionStatus, Dashboard, NewConnection};
//!
//! let now = Local::now().naive_local();
//! let today = now.date();
//!
//! let mut dash = Dashboard::new();
//! let id = dash.add_connection(
//!     NewConnection {
//!         connection_number: "0300-9876543".into(),
//!         status: ConnectionStatus::Inactive,
//!         balance: 0.0,
//!         data_remaining_mb: 1024,
//!         data_total_mb: 51200,
//!         start_date: today - Duration::days(90),
//!         due_date: today - Duration::days(5),
//!         expiry_date: today - Duration::days(2),
//!     },
//!     now,
//! );
//! dash.save_reminder_preference(id, "a@b.com".into(), ContactMethod::Email, now);
//!
//! // First scan logs the overdue notice, later scans do not repeat it
//! assert_eq!(dash.run_overdue_scan(now).len(), 1);
//! assert!(dash.run_overdue_scan(now).is_empty());
//! assert!(dash.log_lines()[0].ends_with("for 0300-9876543: Payment is overdue."));
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activity_log;
pub mod advisory;
pub mod connection;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod registry;
pub mod reminder;
pub mod scanner;

// Re-export main types at crate root
pub use activity_log::{ActivityLog, LogEntry};
pub use advisory::{check_advisory, days_until, Advisory, ADVISORY_WINDOW_DAYS};
pub use connection::{
    parse_date, ConnectionId, ConnectionRecord, ConnectionStatus, NewConnection,
};
pub use dashboard::{Dashboard, Theme};
pub use error::{Error, Result};
pub use notification::{
    Notification, NotificationKind, NotificationSlot, NOTIFICATION_DISPLAY_SECS,
};
pub use registry::Registry;
pub use reminder::{ContactMethod, ReminderBook, ReminderPreference};
pub use scanner::{is_overdue, scan_overdue};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
