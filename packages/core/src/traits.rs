//! Core traits: Cache, Backend.

use std::sync::Arc;

use crate::{Error, Key, Value};

/// Acknowledgment of a submitted write.
///
/// Carries the value that was submitted. It says nothing about whether the
/// write has been applied yet, or whether it ever will be: a write to a
/// stopped store is dropped and still acknowledged.
#[derive(Clone, Debug, PartialEq)]
pub struct Submitted {
    pub value: Value,
}

impl Submitted {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Take the submitted value back.
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// A handle to a running cache backend.
///
/// This is the contract every backend satisfies so callers can swap an
/// in-memory cache for a registry-backed or disk-backed one without
/// changing call sites.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Cache>`.
pub trait Cache: Send + Sync {
    /// Submit an insert-or-replace of `key`.
    ///
    /// Never fails and never blocks on the write being applied.
    fn put(&self, key: Key, value: Value) -> Submitted;

    /// Read the value currently stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key.
    /// * `Ok(Some(value))` - The current value.
    /// * `Err(Error)` - The backend is unavailable or the read timed out.
    fn get(&self, key: &Key) -> Result<Option<Value>, Error>;
}

/// A cache backend that can be brought up on demand.
pub trait Backend {
    /// Options accepted by `start`.
    type Options;

    /// Handle returned by `start`.
    type Handle: Cache;

    /// Start a new, isolated instance of this backend.
    fn start(options: Self::Options) -> Result<Self::Handle, Error>;
}

// Blanket implementations for references and smart pointers

impl<T: Cache + ?Sized> Cache for &T {
    fn put(&self, key: Key, value: Value) -> Submitted {
        (**self).put(key, value)
    }

    fn get(&self, key: &Key) -> Result<Option<Value>, Error> {
        (**self).get(key)
    }
}

impl<T: Cache + ?Sized> Cache for Box<T> {
    fn put(&self, key: Key, value: Value) -> Submitted {
        self.as_ref().put(key, value)
    }

    fn get(&self, key: &Key) -> Result<Option<Value>, Error> {
        self.as_ref().get(key)
    }
}

impl<T: Cache + ?Sized> Cache for Arc<T> {
    fn put(&self, key: Key, value: Value) -> Submitted {
        self.as_ref().put(key, value)
    }

    fn get(&self, key: &Key) -> Result<Option<Value>, Error> {
        self.as_ref().get(key)
    }
}
