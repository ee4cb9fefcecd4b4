//! Store options.

use std::time::Duration;

use schemacache_core::Error;
use serde::{Deserialize, Serialize};

/// Options for starting a store.
///
/// Built in code with the builder methods, or deserialized from the host
/// application's configuration:
///
/// ```json
/// { "name": "schemas", "read_timeout_ms": 250 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    /// Name to register the store under. Unnamed stores are only
    /// reachable through the handle returned by `start`.
    pub name: Option<String>,

    /// Wait budget for reads, in milliseconds. `None` waits indefinitely.
    pub read_timeout_ms: Option<u64>,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a store registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// The read wait budget, if one is configured.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}
