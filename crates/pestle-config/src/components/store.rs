//! Graph store connection settings.

use serde::{Deserialize, Serialize};

/// Connection settings for the SurrealDB graph store.
///
/// The endpoint is an engine URL: `mem://` for an embedded in-memory store
/// (tests, scratch runs), `ws://host:port` for a server. Credentials are
/// only used for remote endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "pestle".to_string(),
            database: "drugs".to_string(),
            username: None,
            password: None,
        }
    }
}

impl StoreConfig {
    /// Credentials as a pair, if both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}
