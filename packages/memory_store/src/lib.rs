//! In-memory schemacache store.
//!
//! A store is an isolated key-value table plus one worker thread that
//! serializes writes into it:
//!
//! - `put` enqueues the write and returns immediately with a `Submitted`
//!   acknowledgment. Writes from one caller apply in submission order.
//! - `get` reads the table directly, without going through the queue, and
//!   returns `Ok(None)` for absent keys.
//! - `stop` makes every handle to the store unavailable.
//!
//! Because reads skip the queue, a `get` right after a `put` of the same key
//! may see the old value or the new one. Call `flush` when that matters.
//!
//! # Example
//!
//! ```rust
//! use schemacache_core::Value;
//! use schemacache_memory::{Registry, StoreOptions};
//!
//! let registry = Registry::new();
//! let h = registry.start(StoreOptions::default()).unwrap();
//!
//! h.put("schema-1", Value::map().with_field("type", "record"));
//! h.flush().unwrap();
//! assert_eq!(
//!     h.get("schema-1").unwrap(),
//!     Some(Value::map().with_field("type", "record"))
//! );
//! assert_eq!(h.get("missing-key").unwrap(), None);
//! ```
//!
//! The process-wide default store lives in [`global`]:
//!
//! ```rust
//! use schemacache_memory::global;
//!
//! global::put(42, "enum");
//! let _maybe = global::get(42).unwrap();
//! ```

pub mod global;
pub mod handle;
pub mod options;
pub mod registry;

mod table;
mod worker;

pub use global::MemoryBackend;
pub use handle::{StoreHandle, StoreId, StoreState};
pub use options::StoreOptions;
pub use registry::Registry;
