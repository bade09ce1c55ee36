//! `WebSocket` handler for the `personAdded` subscription.
//!
//! Clients connect to `GET /ws/person-added` and receive one text frame
//! `{"personAdded": <Person>}` per person added after they connected.
//! The subscription is registered before the upgrade completes and is
//! dropped (and so deregistered) as soon as the socket closes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use switchboard_broadcast::Subscription;
use switchboard_types::Person;

use crate::error::ApiError;
use crate::resolvers::PERSON_ADDED;
use crate::state::AppState;

/// Subscribe to `personAdded` and upgrade the connection.
///
/// # Route
///
/// `GET /ws/person-added`
pub async fn ws_person_added(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.resolvers.person_added()?;
    Ok(ws.on_upgrade(move |socket| stream_people(socket, subscription)))
}

/// Render one `personAdded` text frame: `{"personAdded": <Person>}`.
///
/// # Errors
///
/// Fails only if the person cannot be serialized as JSON.
pub fn person_added_frame(person: &Person) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serde_json::json!({ PERSON_ADDED: person }))
}

/// Forward events to the socket until either side goes away.
async fn stream_people(mut socket: WebSocket, mut subscription: Subscription<Person>) {
    debug!(subscriber = %subscription.id(), "WebSocket client connected");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else {
                    debug!("person-added stream ended, closing WebSocket");
                    if let Err(e) = socket.send(Message::Close(None)).await {
                        debug!("WebSocket close frame not sent: {e}");
                    }
                    return;
                };
                let json = match person_added_frame(event.payload()) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!("Failed to serialize person-added event: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!("WebSocket client disconnected (send failed)");
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
