//! Bounded retry for actions that fail transiently.
//!
//! Where a [`crate::Waiter`] polls a read-only condition against a deadline,
//! [`retry_on`] re-runs a fallible *action* a fixed number of times. The
//! typical customer is a click or read racing a re-render: the element handle
//! goes stale, the action is retried against a fresh lookup.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::trace;

use crate::result::{ErrorKind, QueryError};

/// Attempt count and pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum attempts, including the first (minimum 1)
    pub max_attempts: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt cap and default backoff
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Set the pause between attempts
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// How a successful retry went.
#[derive(Debug, Clone, Copy)]
pub struct RetryReport {
    /// Attempts used, including the successful one
    pub attempts: u32,
    /// Total time across attempts and pauses
    pub elapsed: Duration,
}

/// Run `op`, retrying when it fails with one of `kinds`.
///
/// Pauses `policy.backoff` between attempts. Errors with any other kind
/// propagate immediately; once attempts are exhausted the last transient
/// error propagates too.
///
/// # Errors
///
/// The first non-retryable error, or the last retryable one after
/// `policy.max_attempts` attempts.
pub fn retry_on<T>(
    kinds: &[ErrorKind],
    policy: RetryPolicy,
    mut op: impl FnMut() -> Result<T, QueryError>,
) -> Result<(T, RetryReport), QueryError> {
    let start = Instant::now();
    let cap = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op() {
            Ok(value) => {
                return Ok((
                    value,
                    RetryReport {
                        attempts: attempt,
                        elapsed: start.elapsed(),
                    },
                ))
            }
            Err(e) if kinds.contains(&e.kind) && attempt < cap => {
                trace!(error = %e, attempt, "retryable failure, pausing before next attempt");
                std::thread::sleep(policy.backoff);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Retry `op` on stale-element failures with the default policy (3 attempts,
/// 1s apart)
pub fn retry_on_stale<T>(op: impl FnMut() -> Result<T, QueryError>) -> Result<T, QueryError> {
    retry_on(&[ErrorKind::Stale], RetryPolicy::default(), op).map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> RetryPolicy {
        RetryPolicy::new(3).with_backoff(Duration::from_millis(5))
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_default() {
            let policy = RetryPolicy::default();
            assert_eq!(policy.max_attempts, 3);
            assert_eq!(policy.backoff, Duration::from_secs(1));
        }

        #[test]
        fn test_builder() {
            let policy = RetryPolicy::new(5).with_backoff(Duration::from_millis(100));
            assert_eq!(policy.max_attempts, 5);
            assert_eq!(policy.backoff, Duration::from_millis(100));
        }

        #[test]
        fn test_serde_round_trip() {
            let policy = RetryPolicy::new(7).with_backoff(Duration::from_millis(250));
            let json = serde_json::to_string(&policy).unwrap();
            let back: RetryPolicy = serde_json::from_str(&json).unwrap();
            assert_eq!(back, policy);
        }
    }

    mod retry_on_tests {
        use super::*;

        #[test]
        fn test_first_attempt_success() {
            let (value, report) =
                retry_on(&[ErrorKind::Stale], quick(), || Ok::<_, QueryError>(7)).unwrap();
            assert_eq!(value, 7);
            assert_eq!(report.attempts, 1);
        }

        #[test]
        fn test_recovers_after_transient_failures() {
            let calls = AtomicU32::new(0);
            let (value, report) = retry_on(&[ErrorKind::Stale], quick(), || {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(QueryError::stale("re-rendered"))
                } else {
                    Ok("clicked")
                }
            })
            .unwrap();
            assert_eq!(value, "clicked");
            assert_eq!(report.attempts, 3);
        }

        #[test]
        fn test_exhaustion_returns_last_error() {
            let calls = AtomicU32::new(0);
            let err = retry_on(&[ErrorKind::Stale], quick(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(QueryError::stale("still stale"))
            })
            .unwrap_err();
            assert_eq!(calls.load(Ordering::SeqCst), 3);
            assert_eq!(err.kind, ErrorKind::Stale);
        }

        #[test]
        fn test_non_retryable_error_propagates_immediately() {
            let calls = AtomicU32::new(0);
            let err = retry_on(&[ErrorKind::Stale], quick(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(QueryError::new(ErrorKind::SessionClosed, "gone"))
            })
            .unwrap_err();
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(err.kind, ErrorKind::SessionClosed);
        }

        #[test]
        fn test_zero_attempt_policy_still_runs_once() {
            let policy = RetryPolicy::new(0).with_backoff(Duration::ZERO);
            let (value, report) =
                retry_on(&[ErrorKind::Stale], policy, || Ok::<_, QueryError>(1)).unwrap();
            assert_eq!(value, 1);
            assert_eq!(report.attempts, 1);
        }
    }

    mod retry_on_stale_tests {
        use super::*;

        #[test]
        fn test_passthrough_success() {
            assert_eq!(retry_on_stale(|| Ok::<_, QueryError>(9)).unwrap(), 9);
        }

        #[test]
        fn test_other_kinds_not_retried() {
            let calls = AtomicU32::new(0);
            let err = retry_on_stale(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(QueryError::not_found("nope"))
            })
            .unwrap_err();
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }
}
