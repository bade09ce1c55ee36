//! Insertion-ordered record table.
//!
//! [`Table`] is the single-owner data structure behind
//! [`EntityStore`](crate::EntityStore). Lookups go through a hash map;
//! a separate id list remembers the order in which ids were first
//! inserted so listings come back in insertion order. Overwriting an
//! existing id replaces the record in place and keeps its position.

use std::collections::HashMap;

use switchboard_types::{Record, RecordId};

/// Outcome of [`Table::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The id was not present before.
    Created,
    /// An existing record with the same id was replaced.
    Replaced,
}

/// An insertion-ordered map from [`RecordId`] to [`Record<T>`].
#[derive(Debug, Clone)]
pub struct Table<T> {
    /// Records keyed by id.
    rows: HashMap<RecordId, Record<T>>,
    /// Ids in first-insertion order.
    order: Vec<RecordId>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a record exists under `id`.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.rows.contains_key(id)
    }

    /// Insert `record`, replacing any record with the same id.
    pub fn insert(&mut self, record: Record<T>) -> Insertion {
        let id = record.id.clone();
        match self.rows.insert(id.clone(), record) {
            Some(_) => Insertion::Replaced,
            None => {
                self.order.push(id);
                Insertion::Created
            }
        }
    }

    /// Borrow the record stored under `id`.
    pub fn get(&self, id: &RecordId) -> Option<&Record<T>> {
        self.rows.get(id)
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record<T>> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }
}
