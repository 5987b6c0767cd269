//! Bounded image byte cache shared between the list and whatever loads images.
//!
//! Entry-count LRU: inserting past capacity evicts the least recently used URL.
//! The cache is injected where it is needed; there is no process-wide instance.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;

pub struct ImageCache {
    entries: Mutex<LruCache<String, Arc<[u8]>>>,
}

impl ImageCache {
    /// Default number of images kept.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Creates a cache holding at most `capacity` images (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Mutex::new(LruCache::new(capacity)) }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<[u8]>>> {
        // A panic mid-insert cannot leave the LRU half-updated, so the data is
        // still usable after poisoning.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached bytes for `url` and marks it most recently used.
    pub fn get(&self, url: &str) -> Option<Arc<[u8]>> {
        self.lock().get(url).cloned()
    }

    /// True if `url` is cached. Does not affect recency.
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Stores `bytes` for `url`, evicting the least recently used entry when full.
    pub fn insert(&self, url: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        let url = url.into();
        if let Some((evicted, _)) = self.lock().push(url.clone(), bytes.into()) {
            if evicted != url {
                tracing::trace!(url = %evicted, "image evicted from cache");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let cache = ImageCache::new(2);
        cache.insert("a", vec![1u8]);
        cache.insert("b", vec![2u8]);
        assert_eq!(cache.get("a").as_deref(), Some(&[1u8][..]));

        cache.insert("c", vec![3u8]);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_replaces_bytes() {
        let cache = ImageCache::new(2);
        cache.insert("a", vec![1u8]);
        cache.insert("a", vec![9u8]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").as_deref(), Some(&[9u8][..]));
    }

    #[test]
    fn zero_capacity_still_holds_one() {
        let cache = ImageCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("a", vec![1u8]);
        cache.insert("b", vec![2u8]);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn clear_empties() {
        let cache = ImageCache::default();
        cache.insert("a", vec![1u8]);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 64);
    }
}
