//! Shared application state for the HTTP server.

use crate::resolvers::Resolvers;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Handlers reach the store, the broadcaster, and the optional
/// companion client only through [`Resolvers`].
#[derive(Debug, Clone)]
pub struct AppState {
    /// The resolver context.
    pub resolvers: Resolvers,
}

impl AppState {
    /// Create application state around `resolvers`.
    pub const fn new(resolvers: Resolvers) -> Self {
        Self { resolvers }
    }
}
