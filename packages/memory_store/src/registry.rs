//! Registry of running stores.
//!
//! The Registry is responsible for:
//! - Starting stores and spawning their workers
//! - Enforcing unique store names
//! - Stopping stores and joining their workers

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use schemacache_core::{Error, Result};

use crate::handle::{StoreCore, StoreHandle, StoreId};
use crate::options::StoreOptions;
use crate::table::Table;
use crate::worker::{WriteOp, Worker};

/// A started store with its worker thread.
struct RunningStore {
    core: Arc<StoreCore>,
    worker: Option<JoinHandle<()>>,
}

impl RunningStore {
    /// Mark the store stopped, drain its queue up to now, and join the worker.
    fn shutdown(mut self) {
        let id = self.core.id;
        self.core.mark_stopped();

        // The worker only exits early if it panicked
        let _ = self.core.tx.send(WriteOp::Shutdown);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(store = %id, "store worker panicked");
            }
        }

        tracing::debug!(store = %id, "stopped store");
    }
}

#[derive(Default)]
struct Entries {
    stores: BTreeMap<StoreId, RunningStore>,
    names: HashMap<String, StoreId>,
}

/// Owner of running stores.
///
/// Stores started through a Registry live until they are stopped or the
/// Registry is dropped. Callers only ever hold handles.
///
/// # Example
///
/// ```rust
/// use schemacache_memory::{Registry, StoreOptions};
///
/// let registry = Registry::new();
/// let handle = registry.start(StoreOptions::named("schemas")).unwrap();
///
/// handle.put("orders-value", "record");
/// handle.flush().unwrap();
/// assert!(handle.get("orders-value").unwrap().is_some());
///
/// registry.stop(&handle).unwrap();
/// assert!(handle.get("orders-value").is_err());
/// ```
#[derive(Default)]
pub struct Registry {
    entries: Mutex<Entries>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty store.
    ///
    /// Fails with `NameTaken` if `options.name` is held by a running store
    /// of this registry; the existing store is left untouched.
    pub fn start(&self, options: StoreOptions) -> Result<StoreHandle> {
        let mut entries = self.entries();

        if let Some(name) = &options.name {
            if entries.names.contains_key(name) {
                return Err(Error::NameTaken { name: name.clone() });
            }
        }

        let id = StoreId::new();
        let table = Arc::new(Table::new());
        let (tx, worker) = Worker::channel(id, table.clone());
        let label = options.name.clone().unwrap_or_else(|| id.to_string());
        let worker = worker.spawn(&label)?;

        let read_timeout = options.read_timeout();
        let core = Arc::new(StoreCore::new(id, options.name, read_timeout, table, tx));
        let handle = StoreHandle::new(&core);

        if let Some(name) = handle.name() {
            entries.names.insert(name.to_string(), id);
        }
        entries.stores.insert(
            id,
            RunningStore {
                core,
                worker: Some(worker),
            },
        );

        tracing::debug!(store = %id, name = ?handle.name(), "started store");
        Ok(handle)
    }

    /// Stop the store behind `handle`.
    ///
    /// Writes queued before the call are applied before the worker exits;
    /// the table is released afterwards and the name becomes free. Fails
    /// with `ProcessUnavailable` if the store is not running in this
    /// registry.
    pub fn stop(&self, handle: &StoreHandle) -> Result<()> {
        let running = {
            let mut entries = self.entries();
            let running = entries
                .stores
                .remove(&handle.id())
                .ok_or_else(|| Error::unavailable(handle.id().to_string()))?;
            if let Some(name) = &running.core.name {
                entries.names.remove(name.as_ref());
            }
            running
        };

        running.shutdown();
        Ok(())
    }

    /// Find a running store by name.
    pub fn lookup(&self, name: &str) -> Option<StoreHandle> {
        let entries = self.entries();
        let id = entries.names.get(name)?;
        entries
            .stores
            .get(id)
            .map(|running| StoreHandle::new(&running.core))
    }

    /// Check whether the store behind `handle` is running in this registry.
    pub fn contains(&self, handle: &StoreHandle) -> bool {
        self.entries().stores.contains_key(&handle.id())
    }

    /// Handles to every running store.
    pub fn handles(&self) -> Vec<StoreHandle> {
        self.entries()
            .stores
            .values()
            .map(|running| StoreHandle::new(&running.core))
            .collect()
    }

    /// Number of running stores.
    pub fn len(&self) -> usize {
        self.entries().stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop every running store.
    pub fn shutdown(&self) {
        let stores = {
            let mut entries = self.entries();
            entries.names.clear();
            std::mem::take(&mut entries.stores)
        };

        for running in stores.into_values() {
            running.shutdown();
        }
    }

    // Every mutation leaves the maps consistent, so a poisoned lock is safe to reuse
    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
