//! The concurrent key-value table behind a store.

use std::thread;
use std::time::{Duration, Instant};

use dashmap::try_result::TryResult;
use dashmap::DashMap;
use schemacache_core::{Error, Key, Value};

const MIN_BACKOFF: Duration = Duration::from_micros(50);
const MAX_BACKOFF: Duration = Duration::from_millis(2);

/// Sharded concurrent map from key to value.
///
/// Safe for concurrent readers and writers without outside locking. Only
/// insert-or-replace is exposed: entries are never removed.
#[derive(Debug, Default)]
pub(crate) struct Table {
    entries: DashMap<Key, Value>,
}

impl Table {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, key: Key, value: Value) {
        self.entries.insert(key, value);
    }

    /// Look up `key`, giving up once `budget` has elapsed.
    ///
    /// Without a budget this waits for the shard as long as it takes, and so
    /// does a budget too large to express as a deadline. Otherwise a shard
    /// held by a writer is polled with a short backoff until the deadline and
    /// then reported as `Timeout`.
    pub(crate) fn lookup(
        &self,
        key: &Key,
        budget: Option<Duration>,
    ) -> Result<Option<Value>, Error> {
        let Some((budget, deadline)) =
            budget.and_then(|budget| Some((budget, Instant::now().checked_add(budget)?)))
        else {
            return Ok(self.entries.get(key).map(|entry| entry.value().clone()));
        };

        let mut backoff = MIN_BACKOFF;
        loop {
            match self.entries.try_get(key) {
                TryResult::Present(entry) => return Ok(Some(entry.value().clone())),
                TryResult::Absent => return Ok(None),
                TryResult::Locked => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(Error::timeout(key.clone(), budget));
                    }
                    thread::sleep(backoff.min(deadline - now));
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Hold the write lock on `key`'s shard while `f` runs.
    #[cfg(test)]
    pub(crate) fn with_shard_locked<R>(&self, key: &Key, f: impl FnOnce() -> R) -> R {
        let _guard = self.entries.entry(key.clone()).or_default();
        f()
    }
}
