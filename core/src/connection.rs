//! Connection (subscription) records.
//!
//! A connection is one telecom account line: a display number, a balance,
//! a data allowance and three calendar dates. Records are owned by the
//! [`Registry`](crate::registry::Registry); everything else holds ids or
//! copies.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Megabytes per gigabyte, as the dashboard displays data figures.
pub const MB_PER_GB: f64 = 1024.0;

/// Opaque connection identifier.
///
/// Only the registry mints new ids. Ids are random (UUID v4), so they carry
/// no ordering or timing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// The nil UUID. Never issued by the registry, so it never resolves.
    pub const UNASSIGNED: ConnectionId = ConnectionId(Uuid::nil());

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ConnectionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Line status as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// Line is in service.
    #[default]
    Active,
    /// Line is suspended or closed.
    Inactive,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Active => f.write_str("Active"),
            ConnectionStatus::Inactive => f.write_str("Inactive"),
        }
    }
}

/// Field values for a connection that has not been registered yet.
///
/// Identical to [`ConnectionRecord`] minus the id, which the registry assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConnection {
    /// Display number, e.g. `0312-3456789`. Not required to be unique.
    pub connection_number: String,
    /// Line status.
    pub status: ConnectionStatus,
    /// Outstanding balance. Not checked for sign.
    pub balance: f64,
    /// Data left in the current plan, in MB.
    pub data_remaining_mb: u64,
    /// Plan allowance, in MB.
    pub data_total_mb: u64,
    /// Plan start date.
    pub start_date: NaiveDate,
    /// Bill due date.
    pub due_date: NaiveDate,
    /// Data plan expiry date.
    pub expiry_date: NaiveDate,
}

impl NewConnection {
    /// Attach an id, producing a full record.
    pub fn with_id(self, id: ConnectionId) -> ConnectionRecord {
        ConnectionRecord {
            id,
            connection_number: self.connection_number,
            status: self.status,
            balance: self.balance,
            data_remaining_mb: self.data_remaining_mb,
            data_total_mb: self.data_total_mb,
            start_date: self.start_date,
            due_date: self.due_date,
            expiry_date: self.expiry_date,
        }
    }
}

/// A registered connection.
///
/// Updates replace the whole record by id; fields are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Registry-assigned id, immutable.
    pub id: ConnectionId,
    /// Display number.
    pub connection_number: String,
    /// Line status.
    pub status: ConnectionStatus,
    /// Outstanding balance.
    pub balance: f64,
    /// Data left in the current plan, in MB.
    pub data_remaining_mb: u64,
    /// Plan allowance, in MB.
    pub data_total_mb: u64,
    /// Plan start date.
    pub start_date: NaiveDate,
    /// Bill due date.
    pub due_date: NaiveDate,
    /// Data plan expiry date.
    pub expiry_date: NaiveDate,
}

impl ConnectionRecord {
    /// Data consumed so far, in MB.
    ///
    /// Negative when `data_remaining_mb > data_total_mb`; nothing enforces
    /// that relation.
    pub fn data_used_mb(&self) -> i64 {
        self.data_total_mb as i64 - self.data_remaining_mb as i64
    }

    /// Share of the allowance used, in percent. Zero for an empty plan.
    ///
    /// May fall outside `[0, 100]`; see [`Self::display_usage_percentage`].
    pub fn usage_percentage(&self) -> f64 {
        if self.data_total_mb == 0 {
            return 0.0;
        }
        self.data_used_mb() as f64 / self.data_total_mb as f64 * 100.0
    }

    /// Usage percentage clamped to `[0, 100]` for progress display.
    pub fn display_usage_percentage(&self) -> f64 {
        self.usage_percentage().clamp(0.0, 100.0)
    }

    /// Remaining data in GB.
    pub fn data_remaining_gb(&self) -> f64 {
        self.data_remaining_mb as f64 / MB_PER_GB
    }

    /// Used data in GB.
    pub fn data_used_gb(&self) -> f64 {
        self.data_used_mb() as f64 / MB_PER_GB
    }

    /// Plan allowance in GB.
    pub fn data_total_gb(&self) -> f64 {
        self.data_total_mb as f64 / MB_PER_GB
    }

    /// The due date as an instant: local midnight at the start of that day.
    pub fn due_instant(&self) -> NaiveDateTime {
        self.due_date.and_time(NaiveTime::MIN)
    }
}

/// Parse a `YYYY-MM-DD` form value.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        input: input.to_string(),
    })
}
