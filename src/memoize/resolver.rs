//! Key resolution for [`Memoize`](super::Memoize).

use std::fmt;
use std::future::Future;

use futures::future;

use crate::function::BoxFuture;
use crate::utils::Identity;

/// Maps call arguments to a cache key.
///
/// Resolution may be asynchronous and may fail with the same error type as
/// the wrapped function. Implemented for:
///
/// - [`Identity`]: the key is the whole argument value
/// - closures `Fn(&Args) -> impl Future<Output = Result<K, E>>`
/// - [`SyncResolver`], built with [`resolve_with`], for plain key functions
pub trait KeyResolver<Args, E>: Send + Sync {
    /// The cache key type.
    type Key;

    /// Resolves the key for `arguments`.
    fn resolve<'a>(&'a self, arguments: &'a Args) -> BoxFuture<'a, Result<Self::Key, E>>;
}

/// Keys on a clone of the full argument value.
///
/// A function taking no arguments (`Args = ()`) therefore shares one entry for
/// every call, and a function taking a tuple is keyed on the whole tuple.
impl<Args, E, X> KeyResolver<Args, E> for Identity<X>
where
    Args: Clone + Send,
    E: Send + 'static,
{
    type Key = Args;

    fn resolve<'a>(&'a self, arguments: &'a Args) -> BoxFuture<'a, Result<Args, E>> {
        Box::pin(future::ready(Ok(arguments.clone())))
    }
}

impl<F, Fut, Args, K, E> KeyResolver<Args, E> for F
where
    F: Fn(&Args) -> Fut + Send + Sync,
    Fut: Future<Output = Result<K, E>> + Send + 'static,
{
    type Key = K;

    fn resolve<'a>(&'a self, arguments: &'a Args) -> BoxFuture<'a, Result<K, E>> {
        Box::pin(self(arguments))
    }
}

/// A key resolver backed by a synchronous, infallible key function.
/// Created by [`resolve_with`].
#[derive(Clone, Copy)]
pub struct SyncResolver<F> {
    key_function: F,
}

impl<F> fmt::Debug for SyncResolver<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SyncResolver")
    }
}

impl<F, Args, K, E> KeyResolver<Args, E> for SyncResolver<F>
where
    F: Fn(&Args) -> K + Send + Sync,
    K: Send + 'static,
    E: Send + 'static,
{
    type Key = K;

    fn resolve<'a>(&'a self, arguments: &'a Args) -> BoxFuture<'a, Result<K, E>> {
        Box::pin(future::ready(Ok((self.key_function)(arguments))))
    }
}

/// Builds a key resolver from a synchronous key function.
///
/// # Examples
///
/// ```rust
/// use async_function::AsyncFunction;
/// use async_function::memoize::{memoize_with, resolve_with};
///
/// # futures::executor::block_on(async {
/// let hypot = |(x, y): (i64, i64)| async move { Ok::<_, String>(((x * x + y * y) as f64).sqrt()) };
/// let cached = memoize_with(hypot, resolve_with(|&(x, y): &(i64, i64)| 4093 * y + x));
/// assert_eq!(cached.invoke((3, 4)).await, Ok(5.0));
/// # });
/// ```
#[inline]
pub const fn resolve_with<F>(key_function: F) -> SyncResolver<F> {
    SyncResolver { key_function }
}
