//! Error types for building retry policies.
//!
//! Failures of the wrapped function are never converted into these types:
//! a retried call fails with the last attempt's own error.

use thiserror::Error;

/// Represents an invalid [`BackoffPolicy`](super::BackoffPolicy).
///
/// # Examples
///
/// ```rust
/// use async_function::retry::PolicyError;
///
/// let error = PolicyError::InvalidDelayFactor(-1.0);
/// assert_eq!(
///     error.to_string(),
///     "delay factor must be a finite, non-negative number, got -1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolicyError {
    /// The delay factor is negative, NaN or infinite.
    #[error("delay factor must be a finite, non-negative number, got {0}")]
    InvalidDelayFactor(f64),
}
