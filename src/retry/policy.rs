//! Backoff policy, its configuration form and per-invocation retry state.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::PolicyError;

/// The delay factor applied when none is given: classic exponential backoff.
pub const DEFAULT_DELAY_FACTOR: f64 = 2.0;

/// Maximum number of retries after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum RetryLimit {
    /// At most this many retries; `Limited(0)` means a single attempt.
    Limited(usize),
    /// Retry until success or until the time budget runs out.
    Unlimited,
}

impl RetryLimit {
    /// Returns `true` once `retries` retries have been used up.
    #[inline]
    pub const fn is_reached(self, retries: usize) -> bool {
        match self {
            Self::Limited(limit) => retries >= limit,
            Self::Unlimited => false,
        }
    }
}

impl From<usize> for RetryLimit {
    fn from(limit: usize) -> Self {
        Self::Limited(limit)
    }
}

impl From<Option<usize>> for RetryLimit {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(Self::Unlimited, Self::Limited)
    }
}

/// When and how long to wait between attempts.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `max_retries` | retries allowed after the first attempt |
/// | `initial_delay` | wait before the first retry (zero is allowed) |
/// | `max_total_time` | budget for the sum of all waits, `None` for unbounded |
/// | `delay_factor` | multiplier applied to the wait after each failure |
///
/// The total time budget is checked after a failure against the waits
/// already performed. It only prevents further retries; it never aborts an
/// attempt in flight.
///
/// # Examples
///
/// ```rust
/// use async_function::retry::{BackoffPolicy, RetryLimit};
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::new(RetryLimit::Limited(3), Duration::from_millis(10));
/// let delays: Vec<_> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     vec![Duration::from_millis(10), Duration::from_millis(20), Duration::from_millis(40)]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "BackoffPolicyConfig", into = "BackoffPolicyConfig")
)]
pub struct BackoffPolicy {
    max_retries: RetryLimit,
    initial_delay: Duration,
    max_total_time: Option<Duration>,
    delay_factor: f64,
}

impl BackoffPolicy {
    /// Creates a policy without a time budget and with the default delay
    /// factor of 2.
    #[must_use]
    pub const fn new(max_retries: RetryLimit, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_total_time: None,
            delay_factor: DEFAULT_DELAY_FACTOR,
        }
    }

    /// Stops retrying once the waits performed add up to `max_total_time`.
    #[must_use]
    pub const fn with_max_total_time(mut self, max_total_time: Duration) -> Self {
        self.max_total_time = Some(max_total_time);
        self
    }

    /// Sets the multiplier applied to the wait after every failed attempt.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidDelayFactor`] when `delay_factor` is
    /// negative, NaN or infinite.
    pub fn with_delay_factor(mut self, delay_factor: f64) -> Result<Self, PolicyError> {
        if !delay_factor.is_finite() || delay_factor < 0.0 {
            return Err(PolicyError::InvalidDelayFactor(delay_factor));
        }
        self.delay_factor = delay_factor;
        Ok(self)
    }

    /// Returns the retry limit.
    pub const fn max_retries(&self) -> RetryLimit {
        self.max_retries
    }

    /// Returns the wait before the first retry.
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Returns the budget for the sum of all waits.
    pub const fn max_total_time(&self) -> Option<Duration> {
        self.max_total_time
    }

    /// Returns the delay multiplier.
    pub const fn delay_factor(&self) -> f64 {
        self.delay_factor
    }

    /// Returns `true` if neither the retry count nor the total time is
    /// bounded: a function that never succeeds is then retried forever.
    pub const fn is_unbounded(&self) -> bool {
        matches!(self.max_retries, RetryLimit::Unlimited) && self.max_total_time.is_none()
    }

    /// Returns `true` if a failure observed in `state` must be returned to the
    /// caller instead of retried.
    pub fn should_stop(&self, state: &RetryState) -> bool {
        self.max_retries.is_reached(state.retries)
            || self
                .max_total_time
                .is_some_and(|budget| state.elapsed >= budget)
    }

    /// Returns the waits this policy performs when every attempt fails.
    ///
    /// The iterator is infinite for an [unbounded](Self::is_unbounded) policy.
    pub const fn delays(&self) -> Delays {
        Delays {
            policy: *self,
            state: RetryState::new(self.initial_delay),
        }
    }
}

/// Transient state of one retried invocation.
///
/// Created fresh for every call and never shared between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    retries: usize,
    elapsed: Duration,
    current_delay: Duration,
}

impl RetryState {
    /// Creates the state of an invocation that has not failed yet.
    #[must_use]
    pub const fn new(initial_delay: Duration) -> Self {
        Self {
            retries: 0,
            elapsed: Duration::ZERO,
            current_delay: initial_delay,
        }
    }

    /// Returns the number of retries performed so far.
    pub const fn retries(&self) -> usize {
        self.retries
    }

    /// Returns the sum of the waits performed so far.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the wait before the next retry.
    pub const fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// Records a completed wait and grows the next one by `delay_factor`.
    ///
    /// The delay saturates at `Duration::MAX`.
    pub fn advance(&mut self, delay_factor: f64) {
        self.retries = self.retries.saturating_add(1);
        self.elapsed = self.elapsed.saturating_add(self.current_delay);
        self.current_delay =
            Duration::try_from_secs_f64(self.current_delay.as_secs_f64() * delay_factor)
                .unwrap_or(Duration::MAX);
    }
}

/// Iterator over the waits of a [`BackoffPolicy`]. Created by
/// [`BackoffPolicy::delays`].
#[derive(Debug, Clone)]
pub struct Delays {
    policy: BackoffPolicy,
    state: RetryState,
}

impl Iterator for Delays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.policy.should_stop(&self.state) {
            return None;
        }
        let delay = self.state.current_delay;
        self.state.advance(self.policy.delay_factor);
        Some(delay)
    }
}

/// Plain-data form of a [`BackoffPolicy`], for configuration files.
///
/// Durations are whole milliseconds, so sub-millisecond precision is lost
/// when a policy is converted into this form.
///
/// ```rust
/// use async_function::retry::{BackoffPolicy, BackoffPolicyConfig, RetryLimit};
/// use std::time::Duration;
///
/// let config = BackoffPolicyConfig {
///     max_retries: RetryLimit::Limited(5),
///     initial_delay_ms: 100,
///     max_total_time_ms: Some(2_000),
///     delay_factor: 1.5,
/// };
/// let policy = BackoffPolicy::try_from(config).unwrap();
/// assert_eq!(policy.max_total_time(), Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackoffPolicyConfig {
    /// Retries allowed after the first attempt.
    pub max_retries: RetryLimit,
    /// Wait before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Budget for the sum of all waits, in milliseconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_total_time_ms: Option<u64>,
    /// Multiplier applied to the wait after each failure.
    #[cfg_attr(feature = "serde", serde(default = "default_delay_factor"))]
    pub delay_factor: f64,
}

#[cfg(feature = "serde")]
const fn default_delay_factor() -> f64 {
    DEFAULT_DELAY_FACTOR
}

impl TryFrom<BackoffPolicyConfig> for BackoffPolicy {
    type Error = PolicyError;

    fn try_from(config: BackoffPolicyConfig) -> Result<Self, PolicyError> {
        let policy = Self::new(
            config.max_retries,
            Duration::from_millis(config.initial_delay_ms),
        )
        .with_delay_factor(config.delay_factor)?;
        Ok(match config.max_total_time_ms {
            Some(budget) => policy.with_max_total_time(Duration::from_millis(budget)),
            None => policy,
        })
    }
}

impl From<BackoffPolicy> for BackoffPolicyConfig {
    fn from(policy: BackoffPolicy) -> Self {
        let millis = |duration: Duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self {
            max_retries: policy.max_retries,
            initial_delay_ms: millis(policy.initial_delay),
            max_total_time_ms: policy.max_total_time.map(millis),
            delay_factor: policy.delay_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn millis(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    #[rstest]
    fn test_default_factor_doubles() {
        let policy = BackoffPolicy::new(RetryLimit::Limited(4), Duration::from_millis(10));
        assert_eq!(policy.delays().collect::<Vec<_>>(), millis(&[10, 20, 40, 80]));
    }

    #[rstest]
    fn test_zero_retries_never_waits() {
        let policy = BackoffPolicy::new(RetryLimit::Limited(0), Duration::from_millis(10));
        assert_eq!(policy.delays().count(), 0);
    }

    #[rstest]
    fn test_time_budget_checked_against_waits_done() {
        // waits 10 and 20 run (sum 30 >= 25), the third check stops
        let policy = BackoffPolicy::new(RetryLimit::Unlimited, Duration::from_millis(10))
            .with_max_total_time(Duration::from_millis(25));
        assert_eq!(policy.delays().collect::<Vec<_>>(), millis(&[10, 20]));
    }

    #[rstest]
    #[case(1.0, &[5, 5, 5])]
    #[case(3.0, &[5, 15, 45])]
    #[case(0.0, &[5, 0, 0])]
    fn test_custom_factor(#[case] factor: f64, #[case] expected: &[u64]) {
        let policy = BackoffPolicy::new(RetryLimit::Limited(3), Duration::from_millis(5))
            .with_delay_factor(factor)
            .unwrap();
        assert_eq!(policy.delays().collect::<Vec<_>>(), millis(expected));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_factor_rejected(#[case] factor: f64) {
        let result = BackoffPolicy::new(RetryLimit::Limited(1), Duration::ZERO).with_delay_factor(factor);
        assert!(matches!(result, Err(PolicyError::InvalidDelayFactor(_))));
    }

    #[rstest]
    fn test_delay_saturates() {
        let mut state = RetryState::new(Duration::MAX);
        state.advance(2.0);
        assert_eq!(state.current_delay(), Duration::MAX);
        assert_eq!(state.elapsed(), Duration::MAX);
        assert_eq!(state.retries(), 1);
    }

    #[rstest]
    fn test_unbounded_policy() {
        let policy = BackoffPolicy::new(RetryLimit::Unlimited, Duration::from_millis(1));
        assert!(policy.is_unbounded());
        assert_eq!(policy.delays().take(100).count(), 100);
        assert!(!policy.with_max_total_time(Duration::from_secs(1)).is_unbounded());
    }

    #[rstest]
    fn test_config_round_trip_keeps_millisecond_fields() {
        let policy = BackoffPolicy::new(RetryLimit::Limited(2), Duration::from_millis(250))
            .with_max_total_time(Duration::from_secs(3));
        let config = BackoffPolicyConfig::from(policy);
        assert_eq!(config.initial_delay_ms, 250);
        assert_eq!(config.max_total_time_ms, Some(3_000));
        assert_eq!(BackoffPolicy::try_from(config), Ok(policy));
    }

    #[rstest]
    fn test_retry_limit_from_option() {
        assert_eq!(RetryLimit::from(None), RetryLimit::Unlimited);
        assert_eq!(RetryLimit::from(Some(2)), RetryLimit::Limited(2));
    }
}
