//! Cache configuration.

use crate::config::{parse_size, SizeParseError};

/// Default capacity: 64 MiB.
pub const DEFAULT_CAPACITY: u64 = 64 * 1024 * 1024;

/// Default cache name used in log output.
pub const DEFAULT_NAME: &str = "lru";

/// Configuration for an [`LruCache`](crate::cache::LruCache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum total byte cost of resident values (default: 64 MiB)
    pub capacity: u64,
    /// Name attached to every log event emitted by the cache
    pub name: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            name: DEFAULT_NAME.to_string(),
        }
    }
}

impl CacheConfig {
    /// Create a configuration with the given capacity in bytes.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Create a configuration from a human-readable capacity such as `"512MB"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lrucache::cache::CacheConfig;
    ///
    /// let config = CacheConfig::from_size_str("2MB").unwrap();
    /// assert_eq!(config.capacity, 2 * 1024 * 1024);
    /// assert!(CacheConfig::from_size_str("lots").is_err());
    /// ```
    pub fn from_size_str(capacity: &str) -> Result<Self, SizeParseError> {
        parse_size(capacity).map(Self::new)
    }

    /// Set the cache name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the capacity in bytes.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }
}
