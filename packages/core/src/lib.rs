//! Core schemacache: the backend-agnostic cache contract.
//!
//! Every cache backend speaks the same three-operation shape:
//! - `start`: bring up an isolated instance and hand back a handle
//! - `put`: fire-and-forget write, acknowledged on submission
//! - `get`: synchronous read, absence is `Ok(None)` rather than an error
//!
//! This layer defines the shared vocabulary for that shape:
//! - `Key`: string name or integer identifier
//! - `Value`: opaque tree-shaped data (the cached schema definition)
//! - `Submitted`: the write acknowledgment
//! - `Error`: the failures a read can surface
//!
//! # Example
//!
//! ```rust
//! use schemacache_core::{Cache, Key, Value};
//!
//! fn lookup_schema(cache: &dyn Cache, id: i64) -> schemacache_core::Result<Option<Value>> {
//!     cache.get(&Key::from(id))
//! }
//! ```

mod error;
mod key;
mod traits;
mod value;

pub use error::{Error, Result};
pub use key::Key;
pub use traits::{Backend, Cache, Submitted};
pub use value::Value;

// Async support
#[cfg(feature = "async")]
mod async_traits;

#[cfg(feature = "async")]
pub use async_traits::{AsyncCache, SyncToAsync};
