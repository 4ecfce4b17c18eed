//! lrucache - Thread-safe LRU cache bounded by byte size
//!
//! This library provides an in-process cache that keeps memory use under a
//! fixed byte budget by evicting the least recently used entries. Any value
//! that can report its own size through [`cache::CacheValue`] can be cached.
//!
//! # Example
//!
//! ```
//! use lrucache::cache::{CacheConfig, LruCache};
//! use std::sync::Arc;
//!
//! let config = CacheConfig::from_size_str("1KB").unwrap().with_name("assets");
//! let cache: LruCache<Arc<Vec<u8>>> = LruCache::with_config(config);
//!
//! cache.set("logo", Arc::new(vec![0u8; 600]));
//! cache.set("icon", Arc::new(vec![0u8; 600]));
//!
//! // Only one 600-byte value fits in 1 KB
//! assert_eq!(cache.get("logo"), None);
//! assert_eq!(cache.size(), 600);
//! ```

pub mod cache;
pub mod config;

/// Version of the lrucache library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
