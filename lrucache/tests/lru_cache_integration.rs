//! Integration tests for the byte-bounded LRU cache.
//!
//! These tests exercise the public API end to end:
//! - Size accounting across inserts, updates, deletes and clears
//! - Strict LRU eviction order
//! - Oversized values
//! - Heterogeneous values behind trait objects
//! - Concurrent access from many threads

use std::sync::{Arc, Once};
use std::thread;

use lrucache::cache::{CacheConfig, CacheValue, LruCache};

// =============================================================================
// Test Helpers
// =============================================================================

static INIT_TRACING: Once = Once::new();

/// Route cache log events through the test writer. Set `RUST_LOG=trace` to
/// see individual evictions.
fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A value with a fixed byte cost, compared by identity of its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheValueStub {
    id: u32,
    size: u64,
}

impl CacheValueStub {
    fn new(id: u32, size: u64) -> Self {
        Self { id, size }
    }
}

impl CacheValue for CacheValueStub {
    fn size(&self) -> u64 {
        self.size
    }
}

/// Decoded image stand-in with a size derived from its dimensions.
struct Image {
    width: u64,
    height: u64,
}

impl CacheValue for Image {
    fn size(&self) -> u64 {
        self.width * self.height * 4
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn initial_state() {
    init_tracing();
    let cache: LruCache<CacheValueStub> = LruCache::new(100);

    assert_eq!(cache.capacity(), 100);
    assert_eq!(cache.size(), 0);
}

#[test]
fn unit_cost_capacity_evicts_oldest() {
    init_tracing();
    let cache = LruCache::new(3);
    let value = CacheValueStub::new(1, 1);

    cache.set("key1", value.clone());
    cache.set("key2", value.clone());
    cache.set("key3", value.clone());
    assert_eq!(cache.size(), 3);

    cache.set("key4", value);
    assert_eq!(cache.size(), 3);
    assert_eq!(cache.get("key1"), None, "key1 should be evicted");
}

#[test]
fn same_key_replaces_value_and_cost() {
    init_tracing();
    let cache = LruCache::new(100);
    assert_eq!(cache.get("key"), None);

    let first = CacheValueStub::new(1, 20);
    cache.set("key", first.clone());
    assert_eq!(cache.size(), 20);
    assert_eq!(cache.get("key"), Some(first));

    let second = CacheValueStub::new(2, 40);
    cache.set("key", second.clone());
    assert_eq!(cache.size(), 40);
    assert_eq!(cache.get("key"), Some(second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn delete_missing_key_leaves_cache_untouched() {
    init_tracing();
    let cache = LruCache::new(100);
    let value = CacheValueStub::new(1, 20);
    cache.set("key", value.clone());

    assert_eq!(cache.delete("key2"), None);
    assert_eq!(cache.get("key"), Some(value.clone()));
    assert_eq!(cache.size(), 20);

    assert_eq!(cache.delete("key"), Some(value));
    assert_eq!(cache.get("key"), None);
    assert_eq!(cache.size(), 0);
}

#[test]
fn clear_discards_everything() {
    init_tracing();
    let cache = LruCache::new(100);
    for i in 0..4 {
        cache.set(format!("key{i}"), CacheValueStub::new(i, 20));
    }
    assert_eq!(cache.size(), 80);

    cache.clear();

    assert_eq!(cache.size(), 0);
    assert_eq!(cache.capacity(), 100);
    for i in 0..4 {
        assert_eq!(cache.get(&format!("key{i}")), None);
    }
}

#[test]
fn oversized_value_never_leaves_cache_over_capacity() {
    init_tracing();
    let cache = LruCache::new(100);
    cache.set("small", CacheValueStub::new(1, 10));

    cache.set("huge", CacheValueStub::new(2, 1_000));

    assert!(cache.size() <= cache.capacity());
    assert_eq!(cache.get("huge"), None);
    assert_eq!(cache.get("small"), None);
}

#[test]
fn max_cost_value_empties_cache_without_wrapping_size() {
    init_tracing();
    let cache = LruCache::new(100);
    cache.set("small", CacheValueStub::new(1, 50));

    cache.set("huge", CacheValueStub::new(2, u64::MAX));

    assert_eq!(cache.size(), 0);
    assert!(cache.is_empty());
    assert_eq!(cache.get("huge"), None);
}

#[test]
fn get_promotes_entry_ahead_of_eviction() {
    init_tracing();
    let cache = LruCache::new(30);
    cache.set("a", CacheValueStub::new(1, 10));
    cache.set("b", CacheValueStub::new(2, 10));
    cache.set("c", CacheValueStub::new(3, 10));

    cache.get("a");
    cache.set("d", CacheValueStub::new(4, 10));
    cache.get("b");
    cache.set("e", CacheValueStub::new(5, 10));

    assert_eq!(cache.keys(), vec!["e", "d", "a"]);
}

// =============================================================================
// Configuration and value types
// =============================================================================

#[test]
fn config_from_size_string() {
    init_tracing();
    let config = CacheConfig::from_size_str("4KB").unwrap().with_name("tiles");
    let cache: LruCache<Vec<u8>> = LruCache::with_config(config);

    assert_eq!(cache.capacity(), 4096);
    assert_eq!(cache.name(), "tiles");

    for i in 0..5 {
        cache.set(format!("tile{i}"), vec![0u8; 1024]);
    }
    assert_eq!(cache.size(), 4096);
    assert!(!cache.contains("tile0"));
}

#[test]
fn heterogeneous_values_share_one_cache() {
    init_tracing();
    let cache: LruCache<Arc<dyn CacheValue + Send + Sync>> = LruCache::new(1_000);

    cache.set(
        "sprite",
        Arc::new(Image {
            width: 10,
            height: 10,
        }),
    );
    cache.set("name", Arc::new(String::from("player-one")));
    cache.set("blob", Arc::new(vec![0u8; 200]));

    let name_cost = String::from("player-one").capacity() as u64;
    assert_eq!(cache.size(), 400 + name_cost + 200);

    let sprite = cache.get("sprite").unwrap();
    assert_eq!(sprite.size(), 400);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_access_preserves_invariants() {
    init_tracing();
    const THREADS: u32 = 8;
    const OPS_PER_THREAD: u32 = 2_000;

    let cache = LruCache::new(500);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = format!("key{}", (t * 31 + i * 7) % 64);
                    match i % 5 {
                        0 | 1 => cache.set(key, CacheValueStub::new(i, u64::from(i % 40))),
                        2 | 3 => {
                            cache.get(&key);
                        }
                        _ => {
                            cache.delete(&key);
                        }
                    }
                    assert!(cache.size() <= cache.capacity());
                }
            });
        }
    });

    // Quiescent: the total must match the resident values exactly
    let keys = cache.keys();
    assert_eq!(keys.len(), cache.len());

    let total: u64 = keys
        .iter()
        .map(|key| cache.get(key).map_or(0, |v| v.size()))
        .sum();
    assert_eq!(total, cache.size());
    assert!(cache.size() <= cache.capacity());

    let stats = cache.stats();
    let expected_lookups = u64::from(THREADS * OPS_PER_THREAD * 2 / 5) + keys.len() as u64;
    assert_eq!(stats.total_lookups(), expected_lookups);
}

#[test]
fn concurrent_readers_and_clear() {
    init_tracing();
    let cache = Arc::new(LruCache::new(10_000));
    for i in 0..100 {
        cache.set(format!("key{i}"), CacheValueStub::new(i, 50));
    }

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500 {
                    if t == 0 && i == 250 {
                        cache.clear();
                    }
                    cache.get(&format!("key{}", i % 100));
                    let size = cache.size();
                    assert!(size <= 10_000);
                    assert_eq!(size % 50, 0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.size(), 0);
    assert!(cache.is_empty());
}
