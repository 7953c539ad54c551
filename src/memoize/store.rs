//! Result stores for [`Memoize`](super::Memoize).

use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use parking_lot::Mutex;

/// A mapping from cache keys to computed results.
///
/// Methods take `&self`: a store shared between concurrent calls provides its
/// own interior mutability. No atomicity is expected across `has`, `get` and
/// `set`.
pub trait CacheStore<K, V>: Send + Sync {
    /// Returns `true` if a value is stored for `key`.
    fn has(&self, key: &K) -> bool;

    /// Returns a copy of the value stored for `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value` for `key` unless a value is already stored.
    ///
    /// An existing mapping is never replaced, so a key keeps the first value
    /// cached for it.
    fn set(&self, key: K, value: V);
}

impl<K, V, S> CacheStore<K, V> for Arc<S>
where
    S: CacheStore<K, V> + ?Sized,
{
    #[inline]
    fn has(&self, key: &K) -> bool {
        (**self).has(key)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: K, value: V) {
        (**self).set(key, value);
    }
}

/// In-memory store backed by a `HashMap` behind a mutex.
///
/// The lock is only held for the duration of a single `has`, `get` or `set`,
/// never while the wrapped function runs. Entries are never evicted unless
/// [`clear`](Self::clear) is called.
pub struct MemoryStore<K, V, H = RandomState> {
    entries: Mutex<HashMap<K, V, H>>,
}

/// [`MemoryStore`] using the `rustc-hash` hasher.
#[cfg(feature = "fxhash")]
pub type FxMemoryStore<K, V> = MemoryStore<K, V, rustc_hash::FxBuildHasher>;

impl<K, V> MemoryStore<K, V> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, H> MemoryStore<K, V, H> {
    /// Creates an empty store using `hasher` for its keys.
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            entries: Mutex::new(HashMap::with_hasher(hasher)),
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Removes every cached entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<K, V, H: Default> Default for MemoryStore<K, V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K, V, H> fmt::Debug for MemoryStore<K, V, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemoryStore")
            .field("len", &self.len())
            .finish()
    }
}

impl<K, V, H> CacheStore<K, V> for MemoryStore<K, V, H>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
    H: BuildHasher + Send,
{
    fn has(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: K, value: V) {
        self.entries.lock().entry(key).or_insert(value);
    }
}
