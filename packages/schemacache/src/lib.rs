//! schemacache: a process-local lookup layer for schema definitions.
//!
//! Schemas fetched from a registry (or computed locally) are cached by
//! subject name or by integer id. Callers program against the `Cache`
//! contract and pick a backend; the in-memory backend here is one of them.
//!
//! ```rust
//! use schemacache::{Backend, Cache, Key, MemoryBackend, StoreOptions, Value};
//!
//! let cache = MemoryBackend::start(StoreOptions::named("docs-example")).unwrap();
//! cache.put(Key::from(1i64), Value::map().with_field("type", "record"));
//! cache.flush().unwrap();
//! assert!(Cache::get(&cache, &Key::from(1i64)).unwrap().is_some());
//! ```

pub use schemacache_core::*;

pub use schemacache_memory::{
    global, MemoryBackend, Registry, StoreHandle, StoreId, StoreOptions, StoreState,
};
