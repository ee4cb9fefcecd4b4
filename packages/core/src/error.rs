//! Error types shared by every cache backend.

use std::time::Duration;

use thiserror::Error;

use crate::Key;

/// Errors a cache backend can report.
///
/// Writes never produce one of these: `put` is acknowledged on submission
/// and a write to an unavailable store is dropped. Absence of a key is
/// `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The store was stopped or never started.
    #[error("store unavailable: {store}")]
    ProcessUnavailable { store: String },

    /// A read did not complete within its wait budget.
    #[error("timed out after {budget:?} waiting on {}", waited_on(.key))]
    Timeout { key: Option<Key>, budget: Duration },

    /// A running store already holds this name.
    #[error("store name already registered: {name}")]
    NameTaken { name: String },

    /// The process-wide default store is already running.
    #[error("default store already initialized")]
    AlreadyInitialized,

    /// The store's worker could not be spawned.
    #[error("failed to spawn store worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// Store options could not be parsed.
    #[error("invalid store options: {message}")]
    Config { message: String },
}

impl Error {
    pub fn unavailable(store: impl Into<String>) -> Self {
        Error::ProcessUnavailable {
            store: store.into(),
        }
    }

    pub fn timeout(key: impl Into<Option<Key>>, budget: Duration) -> Self {
        Error::Timeout {
            key: key.into(),
            budget,
        }
    }

    /// Whether this is a `ProcessUnavailable` error.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ProcessUnavailable { .. })
    }

    /// Whether this is a `Timeout` error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

fn waited_on(key: &Option<Key>) -> String {
    match key {
        Some(key) => key.to_string(),
        None => "store".to_string(),
    }
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
