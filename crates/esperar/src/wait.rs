//! Explicit-wait core: condition polling with a deadline.
//!
//! A [`Waiter`] repeatedly evaluates a [`Condition`] against a session until
//! the condition produces a value or the deadline elapses. Errors whose kind
//! is in the configured ignore set are treated as "not ready yet" and
//! retried; every other error terminates the wait immediately.
//!
//! The loop is synchronous and runs on the calling thread: no background
//! tasks, no shared state between wait calls, no cancellation beyond the
//! deadline itself.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::result::{ErrorKind, QueryError, WaitError, WaitResult};
use crate::session::Session;

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Smallest usable polling interval; a zero interval is clamped to this
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

// =============================================================================
// WAIT CONFIG
// =============================================================================

/// Configuration for a wait call.
///
/// Immutable once a wait begins: the waiter works on its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Maximum wall-clock time allotted to the wait.
    ///
    /// A zero timeout still evaluates the condition exactly once.
    pub timeout: Duration,
    /// Delay between condition re-evaluations.
    ///
    /// Must be positive; zero is clamped to 1ms at use.
    pub poll_interval: Duration,
    /// Error kinds treated as "not ready yet" while the deadline has not
    /// passed. Empty by default: nothing is ignored unless declared.
    pub ignored: HashSet<ErrorKind>,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ignored: HashSet::new(),
        }
    }
}

impl WaitConfig {
    /// Create a config with the given timeout and default polling interval
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Add one error kind to the ignore set
    #[must_use]
    pub fn ignoring(mut self, kind: ErrorKind) -> Self {
        self.ignored.insert(kind);
        self
    }

    /// Add several error kinds to the ignore set
    #[must_use]
    pub fn ignoring_each(mut self, kinds: impl IntoIterator<Item = ErrorKind>) -> Self {
        self.ignored.extend(kinds);
        self
    }

    /// Ignore the two absence kinds, [`ErrorKind::NotFound`] and
    /// [`ErrorKind::Stale`]: the usual setup when waiting on elements that
    /// appear and re-render
    #[must_use]
    pub fn ignoring_absence(self) -> Self {
        self.ignoring_each([ErrorKind::NotFound, ErrorKind::Stale])
    }

    /// Check whether an error kind is in the ignore set
    #[must_use]
    pub fn is_ignored(&self, kind: ErrorKind) -> bool {
        self.ignored.contains(&kind)
    }

    /// Short timeout, fast polling (local fakes, unit tests)
    #[must_use]
    pub fn fast() -> Self {
        Self::new(Duration::from_millis(500)).with_poll_interval(Duration::from_millis(10))
    }

    /// Long timeout, relaxed polling (slow remote sessions)
    #[must_use]
    pub fn slow() -> Self {
        Self::new(Duration::from_secs(60)).with_poll_interval(Duration::from_millis(500))
    }
}

// =============================================================================
// CONDITION TRAIT
// =============================================================================

/// A predicate repeatedly evaluated while waiting for a UI state.
///
/// "Not yet satisfied" has two representations, and the waiter handles both:
/// `Ok(None)`, or `Err` with a kind the wait's config ignores.
pub trait Condition<S: Session> {
    /// Value produced when the condition is satisfied
    type Output;

    /// Evaluate against the session
    fn check(&self, session: &S) -> Result<Option<Self::Output>, QueryError>;

    /// Description for timeout diagnostics
    fn description(&self) -> String;

    /// Require this condition and `other` to hold in the same evaluation
    fn and<C: Condition<S>>(self, other: C) -> And<Self, C>
    where
        Self: Sized,
    {
        And {
            first: self,
            second: other,
        }
    }

    /// Satisfy on whichever of this condition or `other` holds first
    fn or<C: Condition<S, Output = Self::Output>>(self, other: C) -> Or<Self, C>
    where
        Self: Sized,
    {
        Or {
            first: self,
            second: other,
        }
    }
}

/// Bare closures are conditions: any `Fn(&S) -> Result<Option<T>, QueryError>`
/// can be handed straight to [`Waiter::until`]. Timeout diagnostics report it
/// as `"<closure>"`; wrap in [`FnCondition`] (or use [`Waiter::until_fn`]) to
/// attach a real description.
impl<S, T, F> Condition<S> for F
where
    S: Session,
    F: Fn(&S) -> Result<Option<T>, QueryError>,
{
    type Output = T;

    fn check(&self, session: &S) -> Result<Option<T>, QueryError> {
        self(session)
    }

    fn description(&self) -> String {
        "<closure>".to_string()
    }
}

/// A closure-based condition with an attached description.
pub struct FnCondition<F> {
    func: F,
    description: String,
}

impl<F> FnCondition<F> {
    /// Wrap a closure as a condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

impl<F> std::fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<S, T, F> Condition<S> for FnCondition<F>
where
    S: Session,
    F: Fn(&S) -> Result<Option<T>, QueryError>,
{
    type Output = T;

    fn check(&self, session: &S) -> Result<Option<T>, QueryError> {
        (self.func)(session)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Conjunction of two conditions; see [`Condition::and`].
#[derive(Debug, Clone)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> Condition<S> for And<A, B>
where
    S: Session,
    A: Condition<S>,
    B: Condition<S>,
{
    type Output = (A::Output, B::Output);

    fn check(&self, session: &S) -> Result<Option<Self::Output>, QueryError> {
        let Some(first) = self.first.check(session)? else {
            return Ok(None);
        };
        let Some(second) = self.second.check(session)? else {
            return Ok(None);
        };
        Ok(Some((first, second)))
    }

    fn description(&self) -> String {
        format!(
            "({}) and ({})",
            self.first.description(),
            self.second.description()
        )
    }
}

/// Disjunction of two conditions; see [`Condition::or`].
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> Condition<S> for Or<A, B>
where
    S: Session,
    A: Condition<S>,
    B: Condition<S, Output = A::Output>,
{
    type Output = A::Output;

    fn check(&self, session: &S) -> Result<Option<Self::Output>, QueryError> {
        if let Some(value) = self.first.check(session)? {
            return Ok(Some(value));
        }
        self.second.check(session)
    }

    fn description(&self) -> String {
        format!(
            "({}) or ({})",
            self.first.description(),
            self.second.description()
        )
    }
}

/// Negation of a condition.
///
/// Satisfied when the inner condition reports not-ready, or fails with one of
/// the absence kinds ([`ErrorKind::NotFound`], [`ErrorKind::Stale`]). Any
/// other error flows out to the waiter's ignore policy unchanged.
#[must_use]
pub fn not<S: Session, C: Condition<S>>(condition: C) -> Not<C> {
    Not { inner: condition }
}

/// Negated condition; see [`not`].
#[derive(Debug, Clone)]
pub struct Not<C> {
    inner: C,
}

impl<S, C> Condition<S> for Not<C>
where
    S: Session,
    C: Condition<S>,
{
    type Output = bool;

    fn check(&self, session: &S) -> Result<Option<bool>, QueryError> {
        match self.inner.check(session) {
            Ok(Some(_)) => Ok(None),
            Ok(None) => Ok(Some(true)),
            Err(e) if matches!(e.kind, ErrorKind::NotFound | ErrorKind::Stale) => Ok(Some(true)),
            Err(e) => Err(e),
        }
    }

    fn description(&self) -> String {
        format!("not ({})", self.inner.description())
    }
}

// =============================================================================
// WAITER
// =============================================================================

/// Polls a condition against a borrowed session until success or deadline.
#[derive(Debug)]
pub struct Waiter<'a, S> {
    session: &'a S,
    config: WaitConfig,
}

impl<'a, S: Session> Waiter<'a, S> {
    /// Create a waiter with the default config
    #[must_use]
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            config: WaitConfig::default(),
        }
    }

    /// Create a waiter with a custom config
    #[must_use]
    pub fn with_config(session: &'a S, config: WaitConfig) -> Self {
        Self { session, config }
    }

    /// Get the active config
    #[must_use]
    pub const fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// Poll `condition` until it yields a value or the deadline elapses.
    ///
    /// # Errors
    ///
    /// [`WaitError::Timeout`] when the deadline passes without success,
    /// carrying the last ignored error observed; [`WaitError::Condition`]
    /// when the condition raises a kind outside the ignore set.
    pub fn until<C: Condition<S>>(&self, condition: C) -> WaitResult<C::Output> {
        let start = Instant::now();
        let poll = self.config.poll_interval.max(MIN_POLL_INTERVAL);
        let mut last_error: Option<QueryError> = None;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match condition.check(self.session) {
                Ok(Some(value)) => {
                    debug!(
                        condition = %condition.description(),
                        attempts,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "wait satisfied"
                    );
                    return Ok(value);
                }
                Ok(None) => {
                    trace!(condition = %condition.description(), attempts, "not ready");
                }
                Err(e) if self.config.is_ignored(e.kind) => {
                    trace!(
                        condition = %condition.description(),
                        attempts,
                        error = %e,
                        "ignored transient error"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(
                        condition = %condition.description(),
                        attempts,
                        error = %e,
                        "wait aborted by non-ignored error"
                    );
                    return Err(WaitError::Condition(e));
                }
            }

            match remaining_sleep(start.elapsed(), self.config.timeout, poll) {
                Some(pause) => std::thread::sleep(pause),
                None => {
                    let elapsed = start.elapsed();
                    debug!(
                        condition = %condition.description(),
                        attempts,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "wait timed out"
                    );
                    return Err(WaitError::Timeout {
                        condition: condition.description(),
                        elapsed,
                        last_error,
                    });
                }
            }
        }
    }

    /// Poll a closure, attaching `description` for diagnostics
    pub fn until_fn<T, F>(&self, func: F, description: impl Into<String>) -> WaitResult<T>
    where
        F: Fn(&S) -> Result<Option<T>, QueryError>,
    {
        self.until(FnCondition::new(func, description))
    }
}

/// Sleep before the next poll: the full interval, clamped so the next
/// evaluation starts no later than the deadline. `None` once the deadline
/// has passed.
fn remaining_sleep(elapsed: Duration, timeout: Duration, poll: Duration) -> Option<Duration> {
    let remaining = timeout.checked_sub(elapsed)?;
    if remaining.is_zero() {
        return None;
    }
    Some(poll.min(remaining))
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Wait for a condition with default polling and the given timeout
pub fn wait_until<S, C>(session: &S, condition: C, timeout: Duration) -> WaitResult<C::Output>
where
    S: Session,
    C: Condition<S>,
{
    Waiter::with_config(session, WaitConfig::new(timeout)).until(condition)
}
