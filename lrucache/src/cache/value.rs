//! Byte-cost capability for cached values.

use std::rc::Rc;
use std::sync::Arc;

/// A value that can report how many bytes it occupies.
///
/// The cache queries [`CacheValue::size`] exactly once when a value is
/// stored and keeps the result alongside the entry. The reported cost is
/// never re-read during eviction or removal, so it should describe the
/// value at the moment it is handed to the cache.
///
/// # Example
///
/// ```
/// use lrucache::cache::{CacheValue, LruCache};
///
/// #[derive(Clone)]
/// struct Texture {
///     width: u32,
///     height: u32,
/// }
///
/// impl CacheValue for Texture {
///     fn size(&self) -> u64 {
///         u64::from(self.width) * u64::from(self.height) * 4
///     }
/// }
///
/// let cache = LruCache::new(1024 * 1024);
/// cache.set("grass", Texture { width: 256, height: 256 });
/// assert_eq!(cache.size(), 256 * 256 * 4);
/// ```
pub trait CacheValue {
    /// Byte cost charged against the cache capacity.
    fn size(&self) -> u64;
}

impl CacheValue for Vec<u8> {
    /// Allocated capacity, not length.
    fn size(&self) -> u64 {
        self.capacity() as u64
    }
}

impl CacheValue for String {
    fn size(&self) -> u64 {
        self.capacity() as u64
    }
}

impl CacheValue for [u8] {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl CacheValue for str {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Box<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Arc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Rc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}
