//! The [`AsyncFunction`] capability every combinator consumes and produces.
//!
//! An async function is anything that, given its arguments, returns a future
//! resolving to a `Result`. The combinators in this crate never inspect the
//! shape of a function: they only call [`AsyncFunction::invoke`]. Functions of
//! several arguments take a tuple as their single `Args` value.
//!
//! # Examples
//!
//! ```rust
//! use async_function::AsyncFunction;
//!
//! # futures::executor::block_on(async {
//! let square = |x: i32| async move { Ok::<_, String>(x * x) };
//! assert_eq!(square.invoke(7).await, Ok(49));
//!
//! let add = |(x, y): (i32, i32)| async move { Ok::<_, String>(x + y) };
//! assert_eq!(add.invoke((2, 3)).await, Ok(5));
//! # });
//! ```

use std::future::Future;

pub use futures::future::BoxFuture;

/// An asynchronous function from `Args` to `Result<Output, Error>`.
///
/// Implemented for every closure or function item whose return value is a
/// `Send + 'static` future of a `Result`, and for every combinator in this
/// crate, so wrapped functions can be wrapped again.
///
/// The returned future borrows `self`: a wrapper must outlive the calls made
/// through it.
pub trait AsyncFunction<Args>: Send + Sync {
    /// The value a successful call resolves to.
    type Output;
    /// The failure a call may resolve to.
    type Error;

    /// Calls the function with `arguments`.
    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<Self::Output, Self::Error>>
    where
        Args: 'a;
}

impl<F, Fut, Args, T, E> AsyncFunction<Args> for F
where
    F: Fn(Args) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    type Output = T;
    type Error = E;

    #[inline]
    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<T, E>>
    where
        Args: 'a,
    {
        Box::pin(self(arguments))
    }
}

/// Method-style access to the combinators.
///
/// Every [`AsyncFunction`] gets these methods; each one is equivalent to the
/// free function of the same name.
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, AsyncFunctionExt};
///
/// # futures::executor::block_on(async {
/// let is_even = |x: i32| async move { Ok::<_, String>(x % 2 == 0) };
/// let is_odd = is_even.negate();
/// assert_eq!(is_odd.invoke(3).await, Ok(true));
/// # });
/// ```
pub trait AsyncFunctionExt<Args>: AsyncFunction<Args> + Sized {
    /// Inverts the awaited result with `!`. See [`negate`](crate::negate).
    fn negate(self) -> crate::utils::Negate<Self> {
        crate::utils::negate(self)
    }

    /// Caches results keyed on the whole argument value. See
    /// [`memoize`](crate::memoize::memoize).
    #[cfg(feature = "memoize")]
    fn memoize(
        self,
    ) -> crate::memoize::Memoize<
        Self,
        crate::memoize::Identity,
        crate::memoize::MemoryStore<Args, Self::Output>,
    >
    where
        Args: Eq + std::hash::Hash,
    {
        crate::memoize::memoize(self)
    }

    /// Caches results keyed by `resolver`. See
    /// [`memoize_with`](crate::memoize::memoize_with).
    #[cfg(feature = "memoize")]
    fn memoize_with<R>(
        self,
        resolver: R,
    ) -> crate::memoize::Memoize<Self, R, crate::memoize::MemoryStore<R::Key, Self::Output>>
    where
        R: crate::memoize::KeyResolver<Args, Self::Error>,
        R::Key: Eq + std::hash::Hash,
    {
        crate::memoize::memoize_with(self, resolver)
    }

    /// Feeds the result of `self` into `next`. See
    /// [`compose_right`](crate::compose::compose_right).
    #[cfg(feature = "compose")]
    fn compose_right<G>(self, next: G) -> crate::compose::ComposeRight<Self, G>
    where
        G: AsyncFunction<Self::Output, Error = Self::Error>,
    {
        crate::compose::compose_right(self, next)
    }

    /// Retries failures with exponential backoff. See
    /// [`backoff_retry`](crate::retry::backoff_retry).
    #[cfg(feature = "retry")]
    fn backoff_retry(
        self,
        max_retries: impl Into<crate::retry::RetryLimit>,
        initial_delay: std::time::Duration,
    ) -> crate::retry::BackoffRetry<Self>
    where
        Args: Clone,
    {
        crate::retry::backoff_retry(self, max_retries, initial_delay)
    }
}

impl<Args, F: AsyncFunction<Args>> AsyncFunctionExt<Args> for F {}
