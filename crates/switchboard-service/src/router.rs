//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /info` -- service identity
/// - `GET /api/people` -- list people
/// - `POST /api/people` -- add a person
/// - `GET /api/people/{id}` -- single person (or `null`)
/// - `GET /api/companion/info` -- companion service id
/// - `GET /ws/person-added` -- `WebSocket` person-added stream
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/info", get(handlers::info))
        .route("/api/people", get(handlers::list_people).post(handlers::add_person))
        .route("/api/people/{id}", get(handlers::get_person))
        .route("/api/companion/info", get(handlers::companion_info))
        .route("/ws/person-added", get(ws::ws_person_added))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
