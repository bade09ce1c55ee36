//! The `Person` sample schema.
//!
//! A person is an open key-value structure. Every field the client sends
//! is kept verbatim, `name` included, so any well-formed JSON object is a
//! valid person and reads back exactly as it was written.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::{Draft, Record};

/// Fields of a person, excluding the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonFields {
    fields: Map<String, Value>,
}

impl PersonFields {
    /// Fields holding only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with_field("name", Value::String(name.into()))
    }

    /// Attach a field, replacing any previous value under `key`.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The `name` field, when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Raw value of one field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields.
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for PersonFields {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// A stored person.
pub type Person = Record<PersonFields>;

/// Input to the `addPerson` mutation.
pub type PersonDraft = Draft<PersonFields>;
