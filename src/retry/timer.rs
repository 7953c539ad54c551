//! The delay capability used between retry attempts.

use std::time::Duration;

use crate::function::BoxFuture;

/// Schedules a resumption after a delay.
///
/// Implementations must suspend the calling task, not block the thread, so
/// unrelated work keeps running while a retry waits.
pub trait Timer: Send + Sync {
    /// Returns a future that resolves once `duration` has passed.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// [`Timer`] backed by `tokio::time::sleep`.
///
/// Must be polled inside a tokio runtime with the time driver enabled.
/// Dropping the returned future cancels the pending timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Waits for `duration` on the tokio timer.
///
/// # Examples
///
/// ```rust
/// use async_function::retry::wait;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// wait(Duration::from_millis(1)).await;
/// # }
/// ```
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}
