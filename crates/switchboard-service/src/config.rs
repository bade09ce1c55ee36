//! Configuration for the Switchboard service.
//!
//! All configuration is loaded from environment variables and every
//! variable is optional. Values that are present but malformed fail
//! startup rather than silently falling back to a default.

use core::num::NonZeroUsize;
use core::str::FromStr;
use std::time::Duration;

use switchboard_broadcast::{BroadcastConfig, OverflowPolicy};

use crate::error::ServiceError;
use crate::logging::LogFormat;

/// Service id used when `SERVICE_ID` is unset.
pub const DEFAULT_SERVICE_ID: &str = "io.switchboard.template";

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Identity used in log context. Does not change behaviour.
    pub service_id: String,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Companion GraphQL endpoint. `None` disables the companion client.
    pub companion_url: Option<String>,
    /// Request timeout for companion calls.
    pub companion_timeout: Duration,
    /// Subscriber queue settings for the person-added broadcaster.
    pub broadcast: BroadcastConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8050,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_id: DEFAULT_SERVICE_ID.to_owned(),
            server: ServerConfig::default(),
            companion_url: None,
            companion_timeout: Duration::from_secs(10),
            broadcast: BroadcastConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// Optional variables:
    /// - `SERVICE_ID` -- service identity (default `io.switchboard.template`)
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- bind port (default `8050`)
    /// - `COMPANION_URL` -- companion GraphQL endpoint (default: none)
    /// - `COMPANION_TIMEOUT_MS` -- companion request timeout (default `10000`)
    /// - `SUBSCRIPTION_QUEUE_CAPACITY` -- per-subscriber queue bound (default: unbounded)
    /// - `SUBSCRIPTION_OVERFLOW` -- `drop-newest` or `disconnect` (default `drop-newest`)
    /// - `LOG_FORMAT` -- `pretty` or `json` (default `pretty`)
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let service_id = var("SERVICE_ID").unwrap_or(defaults.service_id);
        let host = var("HOST").unwrap_or(defaults.server.host);
        let port = parse_or("PORT", var("PORT"), defaults.server.port)?;
        let companion_url = var("COMPANION_URL");
        let companion_timeout_ms: u64 = parse_or("COMPANION_TIMEOUT_MS", var("COMPANION_TIMEOUT_MS"), 10_000)?;

        let overflow = parse_or(
            "SUBSCRIPTION_OVERFLOW",
            var("SUBSCRIPTION_OVERFLOW"),
            OverflowPolicy::default(),
        )?;
        let broadcast = match var("SUBSCRIPTION_QUEUE_CAPACITY") {
            Some(raw) => {
                let capacity = parse::<NonZeroUsize>("SUBSCRIPTION_QUEUE_CAPACITY", &raw)?;
                BroadcastConfig::bounded(capacity, overflow).map_err(|e| {
                    ServiceError::Config(format!("invalid SUBSCRIPTION_QUEUE_CAPACITY: {e}"))
                })?
            }
            None => BroadcastConfig {
                queue_capacity: None,
                overflow,
            },
        };
        let log_format = parse_or("LOG_FORMAT", var("LOG_FORMAT"), LogFormat::default())?;

        Ok(Self {
            service_id,
            server: ServerConfig { host, port },
            companion_url,
            companion_timeout: Duration::from_millis(companion_timeout_ms),
            broadcast,
            log_format,
        })
    }
}

/// Parse a present variable.
fn parse<T>(name: &str, raw: &str) -> Result<T, ServiceError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ServiceError::Config(format!("invalid {name}: {e}")))
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T, ServiceError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.map_or(Ok(default), |raw| parse(name, &raw))
}
