//! Service identity.

use serde::{Deserialize, Serialize};

/// Static identity of a running service, as served by the `info` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Composite id, `"<name>:<version>"`.
    pub id: String,
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Package description.
    pub description: String,
}

impl ServiceInfo {
    /// Build the identity from package metadata, composing the id.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        Self {
            id: format!("{name}:{version}"),
            name,
            version,
            description: description.into(),
        }
    }
}
