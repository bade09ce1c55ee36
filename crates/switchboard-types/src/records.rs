//! Generic record containers.
//!
//! A [`Draft`] is what a caller hands to the store: an optional id plus
//! whatever fields the schema type `T` describes. A [`Record`] is what
//! the store hands back: the same fields with the id resolved. Both
//! flatten `T` on the wire, so a `Record<T>` serializes as
//! `{"id": ..., <fields of T>}`.

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// Creation input for a record whose id may not be known yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft<T> {
    /// Caller-assigned id. `None` (or an empty string) asks the store
    /// to generate one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Schema-specific fields.
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Draft<T> {
    /// A draft without an id.
    pub const fn new(fields: T) -> Self {
        Self { id: None, fields }
    }

    /// A draft with a caller-assigned id.
    pub fn with_id(id: impl Into<RecordId>, fields: T) -> Self {
        Self {
            id: Some(id.into()),
            fields,
        }
    }

    /// Resolve the draft into a [`Record`].
    ///
    /// Keeps the caller's id when it is present and non-empty, otherwise
    /// calls `generate` for a fresh one.
    pub fn resolve_with(self, generate: impl FnOnce() -> RecordId) -> Record<T> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate);
        Record {
            id,
            fields: self.fields,
        }
    }

    /// Resolve the draft, generating a random UUID v4 id when needed.
    pub fn resolve(self) -> Record<T> {
        self.resolve_with(RecordId::generate)
    }
}

/// A stored record: schema fields plus their resolved id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Unique id within the owning store.
    pub id: RecordId,
    /// Schema-specific fields.
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Build a record from an id and its fields.
    pub fn new(id: impl Into<RecordId>, fields: T) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
