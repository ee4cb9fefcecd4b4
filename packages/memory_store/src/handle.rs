//! Store handles.
//!
//! A handle is how callers reach a store: it carries the store's id and a
//! weak back-reference, never ownership. Once the store stops, every clone
//! of its handle reports `ProcessUnavailable` on reads and drops writes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc as std_mpsc;
use std::sync::{Arc, Weak};
use std::time::Duration;

use schemacache_core::{Cache, Error, Key, Result, Submitted, Value};
use uuid::Uuid;

use crate::table::Table;
use crate::worker::{WriteOp, WriteSender};

/// Unique identifier for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(Uuid);

impl StoreId {
    /// Create a new random StoreId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a StoreId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a store, as seen through a handle.
///
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Running,
    Stopped,
}

/// State shared between a store's owner and its handles.
#[derive(Debug)]
pub(crate) struct StoreCore {
    pub(crate) id: StoreId,
    pub(crate) name: Option<Arc<str>>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) table: Arc<Table>,
    pub(crate) tx: WriteSender,
    running: AtomicBool,
}

impl StoreCore {
    pub(crate) fn new(
        id: StoreId,
        name: Option<String>,
        read_timeout: Option<Duration>,
        table: Arc<Table>,
        tx: WriteSender,
    ) -> Self {
        Self {
            id,
            name: name.map(Arc::from),
            read_timeout,
            table,
            tx,
            running: AtomicBool::new(true),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn mark_stopped(&self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Handle to a running store.
///
/// Cheap to clone and safe to share across threads. Writes are
/// fire-and-forget; reads go straight to the table.
///
/// # Read/write race
///
/// `put` only enqueues the write, and `get` does not wait for the queue.
/// A `get` issued right after a `put` of the same key can therefore return
/// either the previous value or the new one. Use `flush` when a read must
/// observe earlier writes.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    id: StoreId,
    name: Option<Arc<str>>,
    read_timeout: Option<Duration>,
    core: Weak<StoreCore>,
}

impl StoreHandle {
    pub(crate) fn new(core: &Arc<StoreCore>) -> Self {
        Self {
            id: core.id,
            name: core.name.clone(),
            read_timeout: core.read_timeout,
            core: Arc::downgrade(core),
        }
    }

    /// The id of the store this handle refers to.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The name the store was started with, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The wait budget applied to `get` and `flush`.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// A copy of this handle with a different wait budget.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn state(&self) -> StoreState {
        if self.core().is_some() {
            StoreState::Running
        } else {
            StoreState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == StoreState::Running
    }

    /// Number of entries currently in the table. Zero once stopped.
    pub fn len(&self) -> usize {
        self.core().map(|core| core.table.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Submit an insert-or-replace of `key`.
    ///
    /// Returns as soon as the write is queued. The acknowledgment carries
    /// the submitted value and is returned even when the store has stopped,
    /// in which case the write is silently dropped.
    pub fn put(&self, key: impl Into<Key>, value: impl Into<Value>) -> Submitted {
        let key = key.into();
        let value = value.into();

        match self.core() {
            Some(core) => {
                let op = WriteOp::Insert {
                    key,
                    value: value.clone(),
                };
                if core.tx.send(op).is_err() {
                    tracing::debug!(store = %self.id, "store worker gone, dropping write");
                }
            }
            None => {
                tracing::debug!(store = %self.id, %key, "store stopped, dropping write");
            }
        }

        Submitted::new(value)
    }

    /// Read the current value of `key`.
    ///
    /// Waits at most the handle's read timeout. Returns `Ok(None)` for keys
    /// that were never written (or whose write has not been applied yet).
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<Value>> {
        self.lookup(&key.into(), self.read_timeout)
    }

    /// Read the current value of `key`, waiting at most `timeout`.
    pub fn get_with_timeout(
        &self,
        key: impl Into<Key>,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        self.lookup(&key.into(), Some(timeout))
    }

    /// Block until every write submitted before this call has been applied.
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = std_mpsc::sync_channel(1);
        {
            let core = self.core().ok_or_else(|| self.unavailable())?;
            core.tx
                .send(WriteOp::Barrier(ack_tx))
                .map_err(|_| self.unavailable())?;
        }

        match self.read_timeout {
            Some(budget) => ack_rx.recv_timeout(budget).map_err(|e| match e {
                std_mpsc::RecvTimeoutError::Timeout => Error::timeout(None::<Key>, budget),
                std_mpsc::RecvTimeoutError::Disconnected => self.unavailable(),
            }),
            None => ack_rx.recv().map_err(|_| self.unavailable()),
        }
    }

    fn lookup(&self, key: &Key, budget: Option<Duration>) -> Result<Option<Value>> {
        let core = self.core().ok_or_else(|| self.unavailable())?;
        core.table.lookup(key, budget)
    }

    fn core(&self) -> Option<Arc<StoreCore>> {
        self.core.upgrade().filter(|core| core.is_running())
    }

    fn unavailable(&self) -> Error {
        match &self.name {
            Some(name) => Error::unavailable(format!("{} ({})", name, self.id)),
            None => Error::unavailable(self.id.to_string()),
        }
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StoreHandle {}

impl Cache for StoreHandle {
    fn put(&self, key: Key, value: Value) -> Submitted {
        StoreHandle::put(self, key, value)
    }

    fn get(&self, key: &Key) -> Result<Option<Value>> {
        self.lookup(key, self.read_timeout)
    }
}
