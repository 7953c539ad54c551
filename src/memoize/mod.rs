//! Result caching for async functions.
//!
//! [`memoize`] wraps an async function so that repeated calls with an
//! equivalent key return the previously computed result instead of calling
//! the function again.
//!
//! # Overview
//!
//! - [`memoize`]: keys on the whole argument value
//! - [`memoize_with`]: keys with a custom [`KeyResolver`]
//! - [`memoize_in`]: custom resolver and a caller-supplied [`CacheStore`]
//!
//! # Invocation
//!
//! ```text
//! key = resolver(args).await?
//! if store.has(key) { return store.get(key) }
//! value = f(args).await?
//! store.set(key, value)
//! ```
//!
//! A failure of the resolver or of the function is returned unchanged and
//! nothing is cached, so the next call with the same key tries again.
//!
//! # Concurrency
//!
//! For calls that do not overlap in time the function runs at most once per
//! distinct key. Two overlapping calls with the same key that both miss the
//! store will both run the function; the store lock is never held across an
//! await. The first result to reach the store is kept and later results for
//! that key never replace it.
//!
//! # Examples
//!
//! ```rust
//! use async_function::AsyncFunction;
//! use async_function::memoize::memoize;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # futures::executor::block_on(async {
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let factorial = memoize(move |n: u64| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     async move { Ok::<_, String>((1..=n).product::<u64>()) }
//! });
//!
//! for n in [3, 4, 5, 3, 4, 5] {
//!     factorial.invoke(n).await.unwrap();
//! }
//! assert_eq!(calls.load(Ordering::SeqCst), 3);
//! # });
//! ```

mod resolver;
mod store;

pub use resolver::{KeyResolver, SyncResolver, resolve_with};
#[cfg(feature = "fxhash")]
pub use store::FxMemoryStore;
pub use store::{CacheStore, MemoryStore};

pub use crate::utils::Identity;

use std::fmt;
use std::hash::Hash;

use crate::function::{AsyncFunction, BoxFuture};

/// Result-cached version of an async function. Created by [`memoize`],
/// [`memoize_with`] or [`memoize_in`].
pub struct Memoize<F, R, S> {
    function: F,
    resolver: R,
    store: S,
}

impl<F, R, S> Memoize<F, R, S> {
    /// Returns the store holding the cached results.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the wrapped function.
    pub const fn function(&self) -> &F {
        &self.function
    }
}

impl<F, R, S: fmt::Debug> fmt::Debug for Memoize<F, R, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoize")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<Args, F, R, S> AsyncFunction<Args> for Memoize<F, R, S>
where
    F: AsyncFunction<Args>,
    F::Output: Clone + Send,
    F::Error: Send,
    R: KeyResolver<Args, F::Error>,
    R::Key: Send,
    S: CacheStore<R::Key, F::Output>,
    Args: Send + Sync,
{
    type Output = F::Output;
    type Error = F::Error;

    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<F::Output, F::Error>>
    where
        Args: 'a,
    {
        Box::pin(async move {
            let key = self.resolver.resolve(&arguments).await?;

            if self.store.has(&key)
                && let Some(value) = self.store.get(&key)
            {
                tracing::trace!("memoize: cache hit");
                return Ok(value);
            }

            tracing::trace!("memoize: cache miss, invoking wrapped function");
            let value = self.function.invoke(arguments).await?;
            self.store.set(key, value.clone());
            Ok(value)
        })
    }
}

/// Wraps `function` so that results are cached by argument value.
///
/// The key is the whole argument value ([`Identity`]): for a function of
/// several arguments that is the argument tuple, for a function of no
/// arguments every call shares the single key `()`. Each call to `memoize`
/// creates its own empty [`MemoryStore`].
pub fn memoize<Args, F>(function: F) -> Memoize<F, Identity, MemoryStore<Args, F::Output>>
where
    F: AsyncFunction<Args>,
    Args: Eq + Hash,
{
    memoize_in(function, Identity::new(), MemoryStore::new())
}

/// Wraps `function` so that results are cached by the key `resolver`
/// produces.
///
/// # Examples
///
/// ```rust
/// use async_function::AsyncFunction;
/// use async_function::memoize::memoize_with;
///
/// # futures::executor::block_on(async {
/// let hypot = |(x, y): (f64, f64)| async move { Ok::<_, String>(x.hypot(y)) };
/// let resolver = |&(x, y): &(f64, f64)| async move { Ok::<_, String>((4093.0 * y + x) as i64) };
/// let cached = memoize_with(hypot, resolver);
/// assert_eq!(cached.invoke((6.0, 8.0)).await, Ok(10.0));
/// assert_eq!(cached.store().len(), 1);
/// # });
/// ```
pub fn memoize_with<Args, F, R>(
    function: F,
    resolver: R,
) -> Memoize<F, R, MemoryStore<R::Key, F::Output>>
where
    F: AsyncFunction<Args>,
    R: KeyResolver<Args, F::Error>,
    R::Key: Eq + Hash,
{
    memoize_in(function, resolver, MemoryStore::new())
}

/// Wraps `function` with a custom resolver and a caller-supplied store.
///
/// Pass an `Arc` of a store to share cached results between wrappers; the
/// lifetime and sharing of such a store are then the caller's concern.
pub const fn memoize_in<F, R, S>(function: F, resolver: R, store: S) -> Memoize<F, R, S> {
    Memoize {
        function,
        resolver,
        store,
    }
}
