//! Due-date and expiry proximity advisories for the selected connection.
//!
//! At most one advisory exists at a time. When both windows are open the
//! bill reminder wins over the data plan warning.

use crate::connection::ConnectionRecord;
use chrono::NaiveDate;
use std::fmt;

/// An advisory is raised when an event is 1..=3 days away.
pub const ADVISORY_WINDOW_DAYS: i64 = 3;

/// A pending event worth telling the operator about.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// The bill is due within the advisory window.
    BillDueSoon {
        /// Display number of the connection.
        connection_number: String,
        /// Balance owed.
        balance: f64,
        /// Whole days until the due date.
        days: i64,
    },
    /// The data plan expires within the advisory window.
    PlanExpiringSoon {
        /// Display number of the connection.
        connection_number: String,
        /// Whole days until expiry.
        days: i64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::BillDueSoon {
                connection_number,
                balance,
                days,
            } => write!(
                f,
                "Reminder: Your bill of ${balance:.2} is due in {days} day(s) for {connection_number}."
            ),
            Advisory::PlanExpiringSoon {
                connection_number,
                days,
            } => write!(
                f,
                "Warning: Your data plan for {connection_number} expires in {days} day(s)."
            ),
        }
    }
}

/// Calendar days from `today` until `date`; negative once `date` has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

fn in_window(days: i64) -> bool {
    days > 0 && days <= ADVISORY_WINDOW_DAYS
}

/// Decide which advisory, if any, applies to `record` on `today`.
pub fn check_advisory(record: &ConnectionRecord, today: NaiveDate) -> Option<Advisory> {
    let days_until_due = days_until(record.due_date, today);
    let days_until_expiry = days_until(record.expiry_date, today);

    if in_window(days_until_due) {
        Some(Advisory::BillDueSoon {
            connection_number: record.connection_number.clone(),
            balance: record.balance,
            days: days_until_due,
        })
    } else if in_window(days_until_expiry) {
        Some(Advisory::PlanExpiringSoon {
            connection_number: record.connection_number.clone(),
            days: days_until_expiry,
        })
    } else {
        None
    }
}
