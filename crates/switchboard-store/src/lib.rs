//! In-memory entity store for the Switchboard service.
//!
//! The store is a non-durable scratch table mapping [`RecordId`] to
//! [`Record<T>`]. It has no eviction, no TTL, and no capacity bound; its
//! lifetime is the lifetime of the process that owns it.
//!
//! - [`table`] -- the synchronous, insertion-ordered table
//! - [`store`] -- [`EntityStore`], the shareable async wrapper used by resolvers
//!
//! [`RecordId`]: switchboard_types::RecordId
//! [`Record<T>`]: switchboard_types::Record

pub mod store;
pub mod table;

pub use store::EntityStore;
pub use table::{Insertion, Table};
