//! Async cache trait.
//!
//! Remote backends (a schema registry client, for one) are naturally async.
//! `AsyncCache` is the async shape of `Cache`, and `SyncToAsync` lets any
//! synchronous backend stand in wherever an `AsyncCache` is expected.
//!
//! Enable the `async` feature to use these:
//!
//! ```toml
//! [dependencies]
//! schemacache-core = { version = "0.1", features = ["async"] }
//! ```

use async_trait::async_trait;

use crate::{Cache, Error, Key, Submitted, Value};

/// Async version of `Cache`.
///
/// Same semantics: `put_async` resolves on submission, `get_async` resolves
/// to `Ok(None)` for absent keys.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn AsyncCache>`.
///
/// # Example
///
/// ```rust,ignore
/// use schemacache_core::{AsyncCache, Key, Value, Error};
///
/// async fn schema_by_id(cache: &dyn AsyncCache, id: i64) -> Result<Option<Value>, Error> {
///     cache.get_async(&Key::from(id)).await
/// }
/// ```
#[async_trait]
pub trait AsyncCache: Send + Sync {
    /// Submit an insert-or-replace of `key`.
    async fn put_async(&self, key: Key, value: Value) -> Submitted;

    /// Read the value currently stored under `key`.
    async fn get_async(&self, key: &Key) -> Result<Option<Value>, Error>;
}

#[async_trait]
impl<T: AsyncCache + ?Sized> AsyncCache for Box<T> {
    async fn put_async(&self, key: Key, value: Value) -> Submitted {
        self.as_ref().put_async(key, value).await
    }

    async fn get_async(&self, key: &Key) -> Result<Option<Value>, Error> {
        self.as_ref().get_async(key).await
    }
}

/// Adapter to use a sync cache through the async interface.
///
/// The sync calls run inline on the polling task. Backends whose reads can
/// block for long should implement `AsyncCache` directly instead.
///
/// # Example
///
/// ```rust,ignore
/// use schemacache_core::SyncToAsync;
///
/// let cache = SyncToAsync::new(handle);
/// cache.get_async(&key).await?;
/// ```
pub struct SyncToAsync<T> {
    inner: T,
}

impl<T> SyncToAsync<T> {
    /// Create a new adapter wrapping a sync cache.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped cache.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Clone> Clone for SyncToAsync<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<T: Cache> AsyncCache for SyncToAsync<T> {
    async fn put_async(&self, key: Key, value: Value) -> Submitted {
        self.inner.put(key, value)
    }

    async fn get_async(&self, key: &Key) -> Result<Option<Value>, Error> {
        self.inner.get(key)
    }
}
