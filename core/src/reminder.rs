//! Reminder contact preferences.
//!
//! One preference per connection; saving again overwrites. Preferences never
//! expire. Contacts are free text and are not validated here.

use crate::connection::ConnectionId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Channel an overdue notice would be sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactMethod {
    /// Email address contact.
    #[default]
    Email,
    /// Phone number contact.
    #[serde(rename = "SMS")]
    Sms,
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMethod::Email => f.write_str("Email"),
            ContactMethod::Sms => f.write_str("SMS"),
        }
    }
}

/// Where and how to remind about one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderPreference {
    /// Email address or phone number.
    pub contact: String,
    /// Delivery channel.
    pub method: ContactMethod,
    /// When the preference was last saved.
    pub saved_at: NaiveDateTime,
}

/// Reminder preferences keyed by connection.
#[derive(Debug, Clone, Default)]
pub struct ReminderBook {
    prefs: HashMap<ConnectionId, ReminderPreference>,
}

impl ReminderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the preference for `id`.
    ///
    /// Returns the preference it replaced, if any.
    pub fn upsert(
        &mut self,
        id: ConnectionId,
        contact: String,
        method: ContactMethod,
        now: NaiveDateTime,
    ) -> Option<ReminderPreference> {
        self.prefs.insert(
            id,
            ReminderPreference {
                contact,
                method,
                saved_at: now,
            },
        )
    }

    /// The preference for `id`, if one was saved.
    pub fn get(&self, id: &ConnectionId) -> Option<&ReminderPreference> {
        self.prefs.get(id)
    }

    /// Number of connections with a preference.
    pub fn len(&self) -> usize {
        self.prefs.len()
    }

    /// Whether no preference has been saved.
    pub fn is_empty(&self) -> bool {
        self.prefs.is_empty()
    }
}

/// Text acknowledging a saved preference.
pub fn confirmation_message(connection_number: &str, pref: &ReminderPreference) -> String {
    format!(
        "Success! Reminders for {connection_number} will be sent to {} via {}.",
        pref.contact, pref.method
    )
}

/// Body of the log line recorded for an overdue connection.
///
/// Contains nothing that changes between scans, so repeated scans produce
/// the same text.
pub fn overdue_message(connection_number: &str, pref: &ReminderPreference) -> String {
    format!(
        "Auto-{} sent to {} for {connection_number}: Payment is overdue.",
        pref.method, pref.contact
    )
}
