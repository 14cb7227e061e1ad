//! In-memory connection registry.
//!
//! Records are kept in insertion order, which is also the order they are
//! listed in. The registry additionally remembers which connection is
//! selected; the selection is not validated, and resolving it falls back to
//! the first record so the detail view is never empty while records exist.

use crate::connection::{ConnectionId, ConnectionRecord, NewConnection};
use crate::error::{Error, Result};

/// Canonical owner of all connection records.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<ConnectionRecord>,
    selected: Option<ConnectionId>,
}

impl Registry {
    /// Create an empty registry with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and select it.
    ///
    /// Field contents are stored as given.
    pub fn add(&mut self, new: NewConnection) -> ConnectionId {
        let mut id = ConnectionId::generate();
        while self.get(&id).is_some() {
            id = ConnectionId::generate();
        }

        self.records.push(new.with_id(id));
        self.selected = Some(id);
        id
    }

    /// Replace the record with the same id.
    ///
    /// Returns [`Error::ConnectionNotFound`] for an id the registry does not
    /// hold; the registry is unchanged in that case.
    pub fn update(&mut self, record: ConnectionRecord) -> Result<()> {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(Error::ConnectionNotFound(record.id)),
        }
    }

    /// Set the selected id. Unknown ids are accepted.
    pub fn select(&mut self, id: ConnectionId) {
        self.selected = Some(id);
    }

    /// Look up a record by id.
    pub fn get(&self, id: &ConnectionId) -> Option<&ConnectionRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// The raw selected id, which may not resolve.
    pub fn selected_id(&self) -> Option<ConnectionId> {
        self.selected
    }

    /// Resolve the selection, falling back to the first record.
    ///
    /// `None` only when the registry is empty.
    pub fn selected(&self) -> Option<&ConnectionRecord> {
        self.selected
            .and_then(|id| self.get(&id))
            .or_else(|| self.records.first())
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[ConnectionRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{parse_date, ConnectionStatus};

    fn new_connection(number: &str) -> NewConnection {
        NewConnection {
            connection_number: number.to_string(),
            status: ConnectionStatus::Active,
            balance: 10.0,
            data_remaining_mb: 1000,
            data_total_mb: 2000,
            start_date: parse_date("2024-01-01").unwrap(),
            due_date: parse_date("2024-02-01").unwrap(),
            expiry_date: parse_date("2024-03-01").unwrap(),
        }
    }

    #[test]
    fn add_inserts_and_selects() {
        let mut registry = Registry::new();
        let id = registry.add(new_connection("0399-0000000"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].id, id);
        assert_eq!(registry.selected().unwrap().id, id);
        assert_eq!(registry.get(&id).unwrap().connection_number, "0399-0000000");
    }

    #[test]
    fn add_assigns_distinct_ids_in_insertion_order() {
        let mut registry = Registry::new();
        let a = registry.add(new_connection("a"));
        let b = registry.add(new_connection("b"));
        let c = registry.add(new_connection("c"));

        assert_ne!(a, b);
        assert_ne!(b, c);
        let ids: Vec<_> = registry.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(registry.selected_id(), Some(c));
    }

    #[test]
    fn update_replaces_whole_record() {
        let mut registry = Registry::new();
        let id = registry.add(new_connection("0312-3456789"));

        let mut edited = registry.get(&id).unwrap().clone();
        edited.balance = 99.5;
        edited.status = ConnectionStatus::Inactive;
        registry.update(edited.clone()).unwrap();

        assert_eq!(registry.get(&id), Some(&edited));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_rejected_without_change() {
        let mut registry = Registry::new();
        registry.add(new_connection("a"));
        let before = registry.list().to_vec();

        let stray = new_connection("ghost").with_id(ConnectionId::generate());
        let stray_id = stray.id;
        let result = registry.update(stray);

        assert_eq!(result, Err(Error::ConnectionNotFound(stray_id)));
        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn dangling_selection_falls_back_to_first() {
        let mut registry = Registry::new();
        let first = registry.add(new_connection("a"));
        registry.add(new_connection("b"));

        registry.select(ConnectionId::generate());
        assert_eq!(registry.selected().unwrap().id, first);
    }

    #[test]
    fn no_selection_falls_back_to_first() {
        let mut registry = Registry::new();
        let first = registry.add(new_connection("a"));
        registry.selected = None;
        assert_eq!(registry.selected().unwrap().id, first);
    }

    #[test]
    fn empty_registry_has_no_selection() {
        let mut registry = Registry::new();
        assert!(registry.selected().is_none());
        registry.select(ConnectionId::generate());
        assert!(registry.selected().is_none());
        assert!(registry.is_empty());
    }
}
