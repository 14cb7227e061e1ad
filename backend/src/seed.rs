//! Demo connections loaded at startup when `SEED_DEMO_DATA` is on.
//!
//! Dates are relative to the day the server starts: one line due in three
//! days, one already overdue, one comfortably in the future.

use crate::store::Store;
use chrono::{Duration, NaiveDate};
use linedesk_core::{ConnectionStatus, NewConnection};
use tracing::info;

pub fn demo_connections(today: NaiveDate) -> Vec<NewConnection> {
    vec![
        NewConnection {
            connection_number: "0312-3456789".to_string(),
            status: ConnectionStatus::Active,
            balance: 15.5,
            data_remaining_mb: 65536,
            data_total_mb: 102_400,
            start_date: today - Duration::days(30),
            due_date: today + Duration::days(3),
            expiry_date: today + Duration::days(25),
        },
        NewConnection {
            connection_number: "0300-9876543".to_string(),
            status: ConnectionStatus::Inactive,
            balance: 0.0,
            data_remaining_mb: 1024,
            data_total_mb: 51200,
            start_date: today - Duration::days(90),
            due_date: today - Duration::days(5),
            expiry_date: today - Duration::days(2),
        },
        NewConnection {
            connection_number: "0333-1122334".to_string(),
            status: ConnectionStatus::Active,
            balance: 5.25,
            data_remaining_mb: 92160,
            data_total_mb: 102_400,
            start_date: today - Duration::days(10),
            due_date: today + Duration::days(15),
            expiry_date: today + Duration::days(45),
        },
    ]
}

/// Load the demo connections and select the first one
pub async fn seed_store(store: &Store) {
    let today = store.now().date();
    let connections = demo_connections(today);
    let count = connections.len();
    let mut first = None;

    for new in connections {
        let id = store.add_connection(new).await;
        first.get_or_insert(id);
    }

    if let Some(id) = first {
        store.select_connection(id).await;
    }

    info!(connections = count, "Seeded demo connections");
}
