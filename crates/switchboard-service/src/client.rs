//! Companion service client.
//!
//! A resolver may reach a companion GraphQL service through an injected
//! client. The client is optional: when none is configured, resolvers must
//! not attempt the call at all.
//!
//! Uses enum dispatch instead of trait objects because async methods are
//! not dyn-compatible in Rust. [`HttpCompanionClient`] posts GraphQL
//! requests over HTTP via `reqwest`; [`StubCompanionClient`] answers with
//! a fixed response or a fixed failure for local development and tests.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// Errors from a companion call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or timed out.
    #[error("companion request failed: {0}")]
    Request(String),

    /// The companion answered with a non-success HTTP status.
    #[error("companion returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The companion answered with GraphQL errors.
    #[error("companion returned GraphQL errors: {0}")]
    GraphQl(String),

    /// The response did not have the expected shape.
    #[error("unexpected companion response: {0}")]
    Response(String),
}

/// A GraphQL request document with optional variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    /// The query document.
    pub query: String,
    /// Variables referenced by the document.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
    /// Operation to run when the document holds several.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// A request without variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            operation_name: None,
        }
    }

    /// Select the operation to run.
    #[must_use]
    pub fn operation(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Bind a variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }
}

// ---------------------------------------------------------------------------
// Unified client enum
// ---------------------------------------------------------------------------

/// A client that can run GraphQL queries against the companion service.
#[derive(Debug, Clone)]
pub enum CompanionClient {
    /// Companion reached over HTTP.
    Http(HttpCompanionClient),
    /// Canned responses.
    Stub(StubCompanionClient),
}

impl CompanionClient {
    /// Run `request` and return the `data` member of the response.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, GraphQL `errors` and
    /// responses without `data` all surface as [`ClientError`].
    pub async fn query(&self, request: &GraphqlRequest) -> Result<Value, ClientError> {
        match self {
            Self::Http(client) => client.query(request).await,
            Self::Stub(client) => client.query(request),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::Stub(_) => "stub",
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Companion client speaking GraphQL-over-HTTP (`POST` with a JSON body).
#[derive(Debug, Clone)]
pub struct HttpCompanionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCompanionClient {
    /// Create a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The GraphQL endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, request: &GraphqlRequest) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("POST {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ClientError::Response(format!("body is not JSON: {e}")))?;

        extract_data(json)
    }
}

/// Pull `data` out of a GraphQL response, turning `errors` into a failure.
fn extract_data(mut json: Value) -> Result<Value, ClientError> {
    let errors = json
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty());
    if let Some(errors) = errors {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect();
        return Err(ClientError::GraphQl(messages.join("; ")));
    }

    match json.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => Err(ClientError::Response(
            "response has no data member".to_owned(),
        )),
        Some(data) => Ok(data),
    }
}

// ---------------------------------------------------------------------------
// Stub client
// ---------------------------------------------------------------------------

/// Companion client that always returns the same outcome.
#[derive(Debug, Clone)]
pub struct StubCompanionClient {
    outcome: Result<Value, String>,
}

impl StubCompanionClient {
    /// Always answer with `data`.
    pub const fn responding(data: Value) -> Self {
        Self { outcome: Ok(data) }
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }

    fn query(&self, request: &GraphqlRequest) -> Result<Value, ClientError> {
        tracing::trace!(query = %request.query, "stub companion query");
        self.outcome.clone().map_err(ClientError::Request)
    }
}
