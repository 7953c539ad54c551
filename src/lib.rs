//! # async-function
//!
//! Combinators that turn async functions into new async functions with
//! modified behavior, without touching the bodies of the functions they wrap.
//!
//! ## Overview
//!
//! - **Result Caching**: [`memoize`](memoize::memoize) returns cached results for
//!   repeated keys
//! - **Composition**: [`compose!`], [`compose_right!`] and
//!   [`Pipeline`](compose::Pipeline) chain async functions in sequence
//! - **Retry**: [`backoff_retry`](retry::backoff_retry) re-invokes a failing
//!   function with exponentially growing delays
//! - **Helpers**: [`negate`], [`identity`], [`noop`], [`arguments`], [`compare`]
//!
//! Every combinator consumes and produces an [`AsyncFunction`], so they nest:
//! `backoff_retry(memoize(f), ..)` retries a cached function.
//!
//! ## Feature Flags
//!
//! - `memoize`: Result caching
//! - `compose`: Sequential composition
//! - `retry`: Exponential-backoff retry (tokio timer)
//! - `serde`: `Serialize`/`Deserialize` for retry policies
//! - `fxhash`: `FxMemoryStore`, a cache store using the `rustc-hash` hasher
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use async_function::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let square = |x: i32| async move { Ok::<_, String>(x * x) };
//! let add_two = |x: i32| async move { Ok::<_, String>(x + 2) };
//! let cached = memoize(compose_right!(square, add_two));
//!
//! assert_eq!(cached.invoke(10).await, Ok(102));
//! assert_eq!(cached.invoke(10).await, Ok(102));
//! assert_eq!(cached.store().len(), 1);
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the [`AsyncFunction`] traits, the helpers and every enabled
/// combinator module.
///
/// # Usage
///
/// ```rust
/// use async_function::prelude::*;
/// ```
pub mod prelude {
    pub use crate::function::*;
    pub use crate::utils::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "retry")]
    pub use crate::retry::*;
}

mod function;
mod utils;

#[cfg(feature = "memoize")]
pub mod memoize;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "retry")]
pub mod retry;

pub use function::{AsyncFunction, AsyncFunctionExt, BoxFuture};
pub use utils::{Identity, Negate, Noop, arguments, compare, identity, negate, noop};

#[cfg(feature = "memoize")]
static_assertions::assert_impl_all!(
    memoize::Memoize<
        fn(u32) -> std::future::Ready<Result<u32, String>>,
        Identity,
        memoize::MemoryStore<u32, u32>,
    >: AsyncFunction<u32>, Send, Sync
);

#[cfg(feature = "compose")]
static_assertions::assert_impl_all!(
    compose::Pipeline<'static, u32, String>: AsyncFunction<u32>, Send, Sync
);

#[cfg(feature = "retry")]
static_assertions::assert_impl_all!(
    retry::BackoffRetry<fn(u32) -> std::future::Ready<Result<u32, String>>>: AsyncFunction<u32>, Send, Sync
);
