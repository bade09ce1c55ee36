//! Error types for the Switchboard service.
//!
//! [`ServiceError`] covers startup and serving failures of the binary.
//! [`ApiError`] is what HTTP handlers return; its
//! [`IntoResponse`](axum::response::IntoResponse) implementation renders a
//! JSON body with a generic message so downstream details never leak to
//! callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::resolvers::ResolverError;

/// Errors that stop the service from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),

    /// The companion client could not be constructed.
    #[error("companion client error: {0}")]
    Client(#[from] crate::client::ClientError),
}

/// Errors returned by HTTP and WebSocket handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A call to the companion service failed.
    #[error("companion service request failed")]
    Downstream,

    /// The service is shutting down and accepts no new subscriptions.
    #[error("service is shutting down")]
    Unavailable,
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::Downstream => Self::Downstream,
            ResolverError::Subscribe(_) => Self::Unavailable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Downstream => StatusCode::BAD_GATEWAY,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
