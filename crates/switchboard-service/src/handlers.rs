//! REST endpoint handlers.
//!
//! Each handler is a thin adapter from HTTP onto one resolver operation.
//!
//! # Endpoints
//!
//! | Method | Path | Resolver |
//! |--------|------|----------|
//! | `GET` | `/info` | `info` |
//! | `GET` | `/api/people` | `allPeople` |
//! | `GET` | `/api/people/{id}` | `person(id)` |
//! | `POST` | `/api/people` | `addPerson(input)` |
//! | `GET` | `/api/companion/info` | companion `info.id` |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use switchboard_types::{PersonDraft, RecordId};

use crate::error::ApiError;
use crate::state::AppState;

/// Return the service identity.
pub async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.resolvers.info().clone())
}

/// List every person in insertion order.
pub async fn list_people(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let people = state.resolvers.all_people().await;
    Json(serde_json::json!({
        "count": people.len(),
        "people": people,
    }))
}

/// Return one person, or JSON `null` when the id is unknown.
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    Json(state.resolvers.person(&RecordId::from(id)).await)
}

/// Add a person and return its id.
pub async fn add_person(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PersonDraft>,
) -> impl IntoResponse {
    let id = state.resolvers.add_person(input).await;
    (StatusCode::CREATED, Json(serde_json::json!({ "id": id })))
}

/// Return the companion service's `info.id`, or `null` without a companion.
pub async fn companion_info(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.resolvers.companion_info().await?;
    Ok(Json(serde_json::json!({ "id": id })))
}
