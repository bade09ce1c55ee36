//! Shared type definitions for the Switchboard service.
//!
//! This crate is the single source of truth for the shapes that flow
//! between the entity store, the event broadcaster, and the resolver
//! surface.
//!
//! # Modules
//!
//! - [`ids`] -- String record identifiers with UUID v4 generation
//! - [`records`] -- Generic [`Draft`] / [`Record`] containers over a caller schema
//! - [`people`] -- The `Person` sample schema
//! - [`info`] -- Service identity served by the `info` query

pub mod ids;
pub mod info;
pub mod people;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use ids::RecordId;
pub use info::ServiceInfo;
pub use people::{Person, PersonDraft, PersonFields};
pub use records::{Draft, Record};
