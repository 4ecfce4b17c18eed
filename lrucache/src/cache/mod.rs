//! Byte-bounded LRU cache.
//!
//! [`LruCache`] combines a key index, an arena-backed recency list and a
//! running size total behind one lock. Values implement [`CacheValue`] to
//! report their byte cost; once the total cost exceeds the configured
//! capacity, least recently used entries are evicted.

mod list;
mod lru;
mod stats;
mod types;
mod value;

pub use lru::LruCache;
pub use stats::CacheStats;
pub use types::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_NAME};
pub use value::CacheValue;
