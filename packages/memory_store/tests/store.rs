use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use schemacache_core::{Backend, Cache, Key, Value};
use schemacache_memory::{MemoryBackend, Registry, StoreHandle, StoreOptions, StoreState};

/// Poll `get` until it returns `expected`, or fail after a few seconds.
fn eventually_eq(handle: &StoreHandle, key: impl Into<Key>, expected: Option<Value>) {
    let key = key.into();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let current = handle.get(key.clone()).unwrap();
        if current == expected {
            return;
        }
        if Instant::now() >= deadline {
            panic!("{} never became {:?}, last saw {:?}", key, expected, current);
        }
        thread::sleep(Duration::from_millis(1));
    }
}

fn schema(kind: &str) -> Value {
    Value::map().with_field("type", kind)
}

#[test]
fn put_then_eventually_get() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    h.put("schema-1", schema("record"));
    eventually_eq(&h, "schema-1", Some(schema("record")));

    h.put(101i64, schema("fixed"));
    eventually_eq(&h, 101i64, Some(schema("fixed")));
}

#[test]
fn example_scenario() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    h.put("schema-1", schema("record"));
    h.flush().unwrap();
    assert_eq!(h.get("schema-1").unwrap(), Some(schema("record")));
    assert_eq!(h.get("missing-key").unwrap(), None);

    h.put("schema-1", schema("enum"));
    h.flush().unwrap();
    assert_eq!(h.get("schema-1").unwrap(), Some(schema("enum")));
}

#[test]
fn never_written_key_is_none() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    assert_eq!(h.get("nothing").unwrap(), None);
    assert_eq!(h.get(0i64).unwrap(), None);
}

#[test]
fn put_acknowledges_submitted_value() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    let ack = h.put("schema-1", schema("record"));
    assert_eq!(ack.into_value(), schema("record"));
}

#[test]
fn last_write_wins() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    h.put("k", "v1");
    h.put("k", "v2");
    eventually_eq(&h, "k", Some(Value::from("v2")));

    // Nothing later can resurrect v1
    h.flush().unwrap();
    assert_eq!(h.get("k").unwrap(), Some(Value::from("v2")));
    assert_eq!(h.len(), 1);
}

#[test]
fn single_caller_order_is_preserved() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    for version in 0..1000i64 {
        h.put("subject", version);
    }
    h.flush().unwrap();
    assert_eq!(h.get("subject").unwrap(), Some(Value::from(999i64)));
}

#[test]
fn stores_are_isolated() {
    let registry = Registry::new();
    let a = registry.start(StoreOptions::default()).unwrap();
    let b = registry.start(StoreOptions::default()).unwrap();

    a.put("k", "only in a");
    a.flush().unwrap();

    assert_eq!(a.get("k").unwrap(), Some(Value::from("only in a")));
    assert_eq!(b.get("k").unwrap(), None);
    assert!(b.is_empty());
}

#[test]
fn name_and_id_keys_do_not_collide() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    h.put("7", "by name");
    h.put(7i64, "by id");
    h.flush().unwrap();

    assert_eq!(h.get("7").unwrap(), Some(Value::from("by name")));
    assert_eq!(h.get(7i64).unwrap(), Some(Value::from("by id")));
}

#[test]
fn concurrent_distinct_key_writes_are_not_lost() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    let writers: Vec<_> = (0..8i64)
        .map(|writer| {
            let h = h.clone();
            thread::spawn(move || {
                for i in 0..250i64 {
                    let id = writer * 1000 + i;
                    h.put(id, format!("schema-{}", id));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    for writer in 0..8i64 {
        for i in 0..250i64 {
            let id = writer * 1000 + i;
            eventually_eq(&h, id, Some(Value::from(format!("schema-{}", id))));
        }
    }
    assert_eq!(h.len(), 8 * 250);
}

#[test]
fn concurrent_readers_and_writers() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();
    h.put("hot", 0i64);
    h.flush().unwrap();

    let writer = {
        let h = h.clone();
        thread::spawn(move || {
            for i in 1..=500i64 {
                h.put("hot", i);
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let h = h.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let seen = h.get("hot").unwrap().and_then(|v| v.as_i64());
                    assert!(matches!(seen, Some(0..=500)));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    eventually_eq(&h, "hot", Some(Value::from(500i64)));
}

/// A read racing a write may see either side of it. Both are correct.
#[test]
fn read_right_after_write_sees_old_or_new() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    h.put("schema-1", "old");
    h.flush().unwrap();

    for _ in 0..100 {
        h.put("schema-1", "new");
        let seen = h.get("schema-1").unwrap();
        assert!(
            seen == Some(Value::from("old")) || seen == Some(Value::from("new")),
            "unexpected {:?}",
            seen
        );

        h.put("schema-1", "old");
        h.flush().unwrap();
    }
}

#[test]
fn read_of_fresh_key_right_after_write_is_none_or_value() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();

    for i in 0..100i64 {
        h.put(i, "v");
        let seen = h.get(i).unwrap();
        assert!(seen.is_none() || seen == Some(Value::from("v")));
    }
}

#[test]
fn stopped_store_is_unavailable() {
    let registry = Registry::new();
    let h = registry.start(StoreOptions::default()).unwrap();
    h.put("k", "v");
    h.flush().unwrap();

    registry.stop(&h).unwrap();

    assert_eq!(h.state(), StoreState::Stopped);
    assert!(h.get("k").unwrap_err().is_unavailable());
    assert!(h.clone().get("k").unwrap_err().is_unavailable());
}

#[test]
fn put_after_stop_is_silent_and_isolated() {
    let registry = Registry::new();
    let old = registry.start(StoreOptions::named("schemas")).unwrap();
    registry.stop(&old).unwrap();

    let ack = old.put("k", "dropped");
    assert_eq!(ack.value, Value::from("dropped"));

    let new = registry.start(StoreOptions::named("schemas")).unwrap();
    old.put("k", "dropped again");
    new.flush().unwrap();
    assert_eq!(new.get("k").unwrap(), None);
}

#[test]
fn timeout_budget_on_handle() {
    let registry = Registry::new();
    let options = StoreOptions::default().with_read_timeout(Duration::from_millis(50));
    let h = registry.start(options).unwrap();

    // Uncontended reads finish well inside the budget
    h.put("k", "v");
    h.flush().unwrap();
    assert_eq!(h.get("k").unwrap(), Some(Value::from("v")));
    assert_eq!(
        h.get_with_timeout("k", Duration::from_secs(1)).unwrap(),
        Some(Value::from("v"))
    );
}

#[test]
fn backend_trait_start() {
    let h = MemoryBackend::start(StoreOptions::default()).unwrap();
    let cache: Arc<dyn Cache> = Arc::new(h.clone());

    cache.put(Key::from("via-trait"), Value::from(true));
    h.flush().unwrap();
    assert_eq!(cache.get(&Key::from("via-trait")).unwrap(), Some(Value::Bool(true)));

    schemacache_memory::global::stop(&h).unwrap();
    assert!(cache.get(&Key::from("via-trait")).unwrap_err().is_unavailable());
}
