//! People sample service for Switchboard.
//!
//! This crate wires the [`EntityStore`](switchboard_store::EntityStore)
//! and the [`Broadcaster`](switchboard_broadcast::Broadcaster) into a
//! resolver surface and exposes it over an Axum HTTP server:
//!
//! - **REST endpoints** for the `info`, `allPeople`, `person`, and
//!   `addPerson` operations
//! - **`WebSocket` endpoint** (`/ws/person-added`) streaming the
//!   `personAdded` subscription
//! - **Companion client** for optional calls to another GraphQL service
//!
//! # Architecture
//!
//! ```text
//! POST /api/people --> Resolvers::add_person --> EntityStore::insert
//!                                            \-> Broadcaster::publish("personAdded")
//!                                                        |
//! GET /ws/person-added <-- Subscription<Person> <--------/
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod resolvers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use client::{ClientError, CompanionClient, GraphqlRequest, HttpCompanionClient, StubCompanionClient};
pub use config::{ServerConfig, ServiceConfig};
pub use error::{ApiError, ServiceError};
pub use resolvers::{PERSON_ADDED, ResolverError, Resolvers, package_info};
pub use router::build_router;
pub use server::start_server;
pub use state::AppState;
