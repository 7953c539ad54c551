//! Exponential-backoff retry for async functions.
//!
//! [`backoff_retry`] wraps an async function so that a failure triggers a
//! delayed re-invocation with the same arguments. The delay grows by a
//! factor after every failure and retrying stops at a retry count and/or a
//! total delay budget.
//!
//! # State Machine
//!
//! Every call runs its own state machine with a fresh [`RetryState`]:
//!
//! ```text
//! Attempting --Ok--> Succeeded
//! Attempting --Err, bound reached--> Failed (last error returned)
//! Attempting --Err--> Waiting --timer--> Attempting
//! ```
//!
//! After each wait the retry count grows by one, the wait is added to the
//! elapsed total and the next wait is multiplied by the delay factor.
//!
//! # Hazards
//!
//! - With [`RetryLimit::Unlimited`] and no `max_total_time`, a function that
//!   never succeeds is retried forever.
//! - `max_total_time` only prevents further retries. An attempt that never
//!   resolves hangs the call regardless of the budget.
//!
//! # Cancellation
//!
//! Dropping the future returned by [`invoke`](crate::AsyncFunction::invoke)
//! drops the pending timer with it; no further attempts are made.
//!
//! # Examples
//!
//! ```rust
//! use async_function::AsyncFunction;
//! use async_function::retry::backoff_retry;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let attempts = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&attempts);
//! let flaky = move |_: ()| {
//!     let attempt = counter.fetch_add(1, Ordering::SeqCst);
//!     async move { if attempt < 2 { Err("not yet") } else { Ok("done") } }
//! };
//!
//! let retried = backoff_retry(flaky, 5, Duration::from_millis(1));
//! assert_eq!(retried.invoke(()).await, Ok("done"));
//! assert_eq!(attempts.load(Ordering::SeqCst), 3);
//! # }
//! ```

mod error;
mod policy;
mod timer;

pub use error::PolicyError;
pub use policy::{
    BackoffPolicy, BackoffPolicyConfig, DEFAULT_DELAY_FACTOR, Delays, RetryLimit, RetryState,
};
pub use timer::{Timer, TokioTimer, wait};

use std::time::Duration;

use crate::function::{AsyncFunction, BoxFuture};

/// Exponential-backoff-retried version of an async function. Created by
/// [`backoff_retry`] or [`BackoffRetry::with_policy`].
#[derive(Debug, Clone)]
pub struct BackoffRetry<F, T = TokioTimer> {
    function: F,
    policy: BackoffPolicy,
    timer: T,
}

/// Wraps `function` so that failures are retried with exponential backoff.
///
/// `max_retries` is the number of retries after the first attempt (pass
/// [`RetryLimit::Unlimited`] for no limit) and `initial_delay` the wait
/// before the first retry. The delay doubles after each failure unless
/// changed with [`BackoffRetry::delay_factor`]; there is no total time
/// budget unless set with [`BackoffRetry::max_total_time`].
///
/// The returned function fails with the error of its last attempt.
///
/// # Panics
///
/// With the default [`TokioTimer`], invoking the returned function panics at
/// the first wait when it is not polled inside a tokio runtime with the time
/// driver enabled. Use [`BackoffRetry::with_timer`] to run on another
/// executor.
pub fn backoff_retry<F>(
    function: F,
    max_retries: impl Into<RetryLimit>,
    initial_delay: Duration,
) -> BackoffRetry<F> {
    BackoffRetry::with_policy(
        function,
        BackoffPolicy::new(max_retries.into(), initial_delay),
    )
}

impl<F> BackoffRetry<F> {
    /// Wraps `function` with an existing policy.
    pub const fn with_policy(function: F, policy: BackoffPolicy) -> Self {
        Self {
            function,
            policy,
            timer: TokioTimer,
        }
    }
}

impl<F, T> BackoffRetry<F, T> {
    /// Stops retrying once the waits performed add up to `max_total_time`.
    #[must_use]
    pub fn max_total_time(mut self, max_total_time: Duration) -> Self {
        self.policy = self.policy.with_max_total_time(max_total_time);
        self
    }

    /// Sets the multiplier applied to the wait after each failure.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidDelayFactor`] when `delay_factor` is
    /// negative, NaN or infinite.
    pub fn delay_factor(mut self, delay_factor: f64) -> Result<Self, PolicyError> {
        self.policy = self.policy.with_delay_factor(delay_factor)?;
        Ok(self)
    }

    /// Replaces the timer used to wait between attempts.
    pub fn with_timer<U: Timer>(self, timer: U) -> BackoffRetry<F, U> {
        BackoffRetry {
            function: self.function,
            policy: self.policy,
            timer,
        }
    }

    /// Returns the retry policy.
    pub const fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }
}

impl<Args, F, T> AsyncFunction<Args> for BackoffRetry<F, T>
where
    F: AsyncFunction<Args>,
    F::Output: Send,
    F::Error: Send,
    T: Timer,
    Args: Clone + Send,
{
    type Output = F::Output;
    type Error = F::Error;

    fn invoke<'a>(&'a self, arguments: Args) -> BoxFuture<'a, Result<F::Output, F::Error>>
    where
        Args: 'a,
    {
        Box::pin(async move {
            let mut state = RetryState::new(self.policy.initial_delay());
            loop {
                let error = match self.function.invoke(arguments.clone()).await {
                    Ok(value) => return Ok(value),
                    Err(error) => error,
                };

                if self.policy.should_stop(&state) {
                    tracing::debug!(
                        attempts = state.retries() + 1,
                        elapsed = ?state.elapsed(),
                        "backoff retry: giving up, returning last error"
                    );
                    return Err(error);
                }

                if state.retries() == 0 && self.policy.is_unbounded() {
                    tracing::warn!("backoff retry: no retry limit or time budget, retrying until success");
                }
                tracing::debug!(
                    attempt = state.retries() + 1,
                    delay = ?state.current_delay(),
                    "backoff retry: attempt failed, waiting before next attempt"
                );

                self.timer.sleep(state.current_delay()).await;
                state.advance(self.policy.delay_factor());
            }
        })
    }
}
