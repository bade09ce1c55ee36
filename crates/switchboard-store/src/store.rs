//! Shareable async entity store.
//!
//! [`EntityStore`] wraps a [`Table`] in a [`tokio::sync::RwLock`] so a
//! single instance can be held in an [`Arc`](std::sync::Arc) and used by
//! every resolver invocation. Each operation takes the lock exactly once,
//! so a `put` is never observed half-applied.

use tokio::sync::RwLock;
use tracing::debug;

use switchboard_types::{Draft, Record, RecordId};

use crate::table::{Insertion, Table};

/// Process-lifetime map from [`RecordId`] to [`Record<T>`].
///
/// Generic over the schema type `T`; records are cloned out on read so
/// the store keeps exclusive ownership of its contents.
#[derive(Debug)]
pub struct EntityStore<T> {
    table: RwLock<Table<T>>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.is_empty()
    }

    /// Whether a record exists under `id`.
    pub async fn contains(&self, id: &RecordId) -> bool {
        self.table.read().await.contains(id)
    }

    /// Insert or overwrite a record and return its id.
    ///
    /// When the draft carries no id (or an empty one) a random UUID v4 id
    /// is generated. The remaining fields are stored as given.
    pub async fn put(&self, draft: Draft<T>) -> RecordId {
        let record = draft.resolve();
        let id = record.id.clone();
        let outcome = self.table.write().await.insert(record);
        debug!(
            record_id = %id,
            replaced = outcome == Insertion::Replaced,
            "record stored"
        );
        id
    }
}

impl<T: Clone> EntityStore<T> {
    /// Like [`put`](Self::put), but return a copy of the stored record.
    ///
    /// The copy is taken under the same write lock as the insert, so it is
    /// exactly what was stored even if another writer overwrites the id
    /// right after.
    pub async fn insert(&self, draft: Draft<T>) -> Record<T> {
        let record = draft.resolve();
        let stored = record.clone();
        let outcome = self.table.write().await.insert(record);
        debug!(
            record_id = %stored.id,
            replaced = outcome == Insertion::Replaced,
            "record stored"
        );
        stored
    }

    /// Look up a record. A miss is `None`, never an error.
    pub async fn get(&self, id: &RecordId) -> Option<Record<T>> {
        self.table.read().await.get(id).cloned()
    }

    /// Snapshot of every record in insertion order.
    pub async fn list_all(&self) -> Vec<Record<T>> {
        self.table.read().await.iter().cloned().collect()
    }
}
