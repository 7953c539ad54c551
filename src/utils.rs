//! Small async functions and combinators that need no state.
//!
//! - [`identity`]: resolves to its argument
//! - [`noop`]: ignores its arguments and resolves to `()`
//! - [`negate`]: inverts the awaited result of another async function
//! - [`arguments`]: awaits a list of argument futures
//! - [`compare`]: awaits two values and compares them

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::ops::Not;

use futures::future::{self, TryFutureExt};

use crate::function::{AsyncFunction, BoxFuture};

/// The async identity function: resolves to its argument unchanged.
///
/// `E` is the (never produced) error type, so `Identity` can stand in for any
/// fallible function. It is also the default key resolver of
/// [`memoize`](crate::memoize::memoize), keying on the whole argument value.
pub struct Identity<E = Infallible>(PhantomData<fn() -> E>);

impl<E> Identity<E> {
    /// Creates the identity function.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for Identity<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Identity<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Identity<E> {}

impl<E> fmt::Debug for Identity<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Identity")
    }
}

impl<A, E> AsyncFunction<A> for Identity<E>
where
    A: Send,
    E: Send,
{
    type Output = A;
    type Error = E;

    fn invoke<'a>(&'a self, arguments: A) -> BoxFuture<'a, Result<A, E>>
    where
        A: 'a,
    {
        Box::pin(future::ready(Ok(arguments)))
    }
}

/// Returns the async identity function.
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, identity};
///
/// # futures::executor::block_on(async {
/// let same = identity::<String>();
/// assert_eq!(same.invoke(42).await, Ok(42));
/// # });
/// ```
#[inline]
#[must_use]
pub const fn identity<E>() -> Identity<E> {
    Identity::new()
}

/// An async function that ignores its arguments and resolves to `()`.
///
/// This is also what an empty [`compose!`](crate::compose!) or
/// [`compose_right!`](crate::compose_right!) evaluates to.
pub struct Noop<E = Infallible>(PhantomData<fn() -> E>);

impl<E> Noop<E> {
    /// Creates the no-op function.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for Noop<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Noop<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Noop<E> {}

impl<E> fmt::Debug for Noop<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Noop")
    }
}

impl<Args, E> AsyncFunction<Args> for Noop<E>
where
    E: Send,
{
    type Output = ();
    type Error = E;

    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<(), E>>
    where
        Args: 'a,
    {
        drop(arguments);
        Box::pin(future::ready(Ok(())))
    }
}

/// Returns an async function that does nothing.
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, noop};
///
/// # futures::executor::block_on(async {
/// let nothing = noop::<String>();
/// assert_eq!(nothing.invoke((1, "two")).await, Ok(()));
/// # });
/// ```
#[inline]
#[must_use]
pub const fn noop<E>() -> Noop<E> {
    Noop::new()
}

/// Result-negated version of an async function. Created by [`negate`].
#[derive(Debug, Clone, Copy)]
pub struct Negate<F> {
    function: F,
}

impl<Args, F> AsyncFunction<Args> for Negate<F>
where
    F: AsyncFunction<Args>,
    F::Output: Not,
{
    type Output = <F::Output as Not>::Output;
    type Error = F::Error;

    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<Self::Output, F::Error>>
    where
        Args: 'a,
    {
        Box::pin(self.function.invoke(arguments).map_ok(|value| !value))
    }
}

/// Wraps `function` so that its awaited result is inverted with `!`.
///
/// Failures pass through untouched.
///
/// # Examples
///
/// ```rust
/// use async_function::{AsyncFunction, negate};
///
/// # futures::executor::block_on(async {
/// let is_finite = |x: f64| async move { Ok::<_, String>(x.is_finite()) };
/// let is_infinite = negate(is_finite);
/// assert_eq!(is_infinite.invoke(f64::INFINITY).await, Ok(true));
/// assert_eq!(is_infinite.invoke(1.0).await, Ok(false));
/// # });
/// ```
#[inline]
pub const fn negate<F>(function: F) -> Negate<F> {
    Negate { function }
}

/// Awaits every argument future and returns the values in order.
///
/// The futures are polled concurrently.
///
/// # Examples
///
/// ```rust
/// use async_function::arguments;
/// use futures::future::{BoxFuture, FutureExt};
///
/// # futures::executor::block_on(async {
/// let values: Vec<BoxFuture<'static, &str>> = vec![async { "a" }.boxed(), async { "b" }.boxed()];
/// assert_eq!(arguments(values).await, vec!["a", "b"]);
/// # });
/// ```
pub async fn arguments<I>(values: I) -> Vec<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future,
{
    future::join_all(values).await
}

/// Awaits two values and compares them.
///
/// # Examples
///
/// ```rust
/// use async_function::compare;
/// use std::cmp::Ordering;
///
/// # futures::executor::block_on(async {
/// assert_eq!(compare(async { 1 }, async { 2 }).await, Ordering::Less);
/// assert_eq!(compare(async { "b" }, async { "a" }).await, Ordering::Greater);
/// # });
/// ```
pub async fn compare<T, A, B>(first: A, second: B) -> Ordering
where
    T: Ord,
    A: Future<Output = T>,
    B: Future<Output = T>,
{
    let first = first.await;
    let second = second.await;
    first.cmp(&second)
}
