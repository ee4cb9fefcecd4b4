//! The serialization worker that applies a store's writes.
//!
//! Every `put` becomes a `WriteOp` on an unbounded tokio channel. One
//! dedicated thread drains the channel in receipt order and applies each
//! write to the table, so writes from one caller land in the order they
//! were submitted.

use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::thread;

use schemacache_core::{Key, Value};
use tokio::sync::mpsc;

use crate::handle::StoreId;
use crate::table::Table;

/// A request queued for the worker.
#[derive(Debug)]
pub(crate) enum WriteOp {
    /// Insert or replace an entry.
    Insert { key: Key, value: Value },

    /// Acknowledge once every earlier op has been applied.
    Barrier(std_mpsc::SyncSender<()>),

    /// Stop after everything queued before it.
    Shutdown,
}

pub(crate) type WriteSender = mpsc::UnboundedSender<WriteOp>;

/// Consumer half of a store's write queue.
pub(crate) struct Worker {
    id: StoreId,
    table: Arc<Table>,
    rx: mpsc::UnboundedReceiver<WriteOp>,
}

impl Worker {
    /// Create the queue for a store's table.
    ///
    /// Returns the sender callers submit through and the worker that
    /// consumes it.
    pub(crate) fn channel(id: StoreId, table: Arc<Table>) -> (WriteSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { id, table, rx })
    }

    /// Run the worker on its own thread.
    pub(crate) fn spawn(self, label: &str) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name(format!("schemacache-{}", label))
            .spawn(move || self.run())
    }

    fn run(mut self) {
        tracing::debug!(store = %self.id, "store worker started");

        while let Some(op) = self.rx.blocking_recv() {
            match op {
                WriteOp::Insert { key, value } => {
                    tracing::trace!(store = %self.id, %key, "applying write");
                    self.table.insert(key, value);
                }
                WriteOp::Barrier(ack) => {
                    // The waiter may have given up
                    let _ = ack.send(());
                }
                WriteOp::Shutdown => break,
            }
        }

        tracing::debug!(store = %self.id, "store worker stopped");
    }
}
