//! The process-wide registry and default store.
//!
//! Most applications want one schema cache for the whole process. The
//! default store is started explicitly with [`init`], or lazily on first
//! use, and torn down with [`shutdown`]. After a shutdown the next access
//! starts a fresh, empty default store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use schemacache_core::{Backend, Error, Key, Result, Submitted, Value};

use crate::handle::StoreHandle;
use crate::options::StoreOptions;
use crate::registry::Registry;

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
    static ref DEFAULT: Mutex<Option<StoreHandle>> = Mutex::new(None);
}

fn default_slot() -> MutexGuard<'static, Option<StoreHandle>> {
    DEFAULT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Start a store on the process-wide registry.
pub fn start(options: StoreOptions) -> Result<StoreHandle> {
    REGISTRY.start(options)
}

/// Stop a store started on the process-wide registry.
pub fn stop(handle: &StoreHandle) -> Result<()> {
    REGISTRY.stop(handle)
}

/// Start the default store with `options`.
///
/// Fails with `AlreadyInitialized` while a default store is running.
pub fn init(options: StoreOptions) -> Result<StoreHandle> {
    let mut slot = default_slot();
    if slot.as_ref().is_some_and(StoreHandle::is_running) {
        return Err(Error::AlreadyInitialized);
    }

    let handle = REGISTRY.start(options)?;
    *slot = Some(handle.clone());
    Ok(handle)
}

/// Handle to the default store, starting it with default options if
/// nothing is running.
pub fn default_handle() -> Result<StoreHandle> {
    let mut slot = default_slot();
    if let Some(handle) = slot.as_ref().filter(|handle| handle.is_running()) {
        return Ok(handle.clone());
    }

    let handle = REGISTRY.start(StoreOptions::default())?;
    tracing::debug!(store = %handle.id(), "started default store");
    *slot = Some(handle.clone());
    Ok(handle)
}

/// Stop the default store, if one is running.
pub fn shutdown() -> Result<()> {
    let Some(handle) = default_slot().take() else {
        return Ok(());
    };

    match REGISTRY.stop(&handle) {
        // Already stopped through `stop`
        Err(error) if error.is_unavailable() => Ok(()),
        result => result,
    }
}

/// Submit a write to the default store.
///
/// Never fails. If the default store cannot be started the write is
/// dropped.
pub fn put(key: impl Into<Key>, value: impl Into<Value>) -> Submitted {
    match default_handle() {
        Ok(handle) => handle.put(key, value),
        Err(error) => {
            tracing::warn!(%error, "default store unavailable, dropping write");
            Submitted::new(value.into())
        }
    }
}

/// Read from the default store.
pub fn get(key: impl Into<Key>) -> Result<Option<Value>> {
    default_handle()?.get(key)
}

/// The in-memory backend, for code written against `Backend`.
///
/// Stores it starts live on the process-wide registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    type Options = StoreOptions;
    type Handle = StoreHandle;

    fn start(options: StoreOptions) -> Result<StoreHandle> {
        REGISTRY.start(options)
    }
}
