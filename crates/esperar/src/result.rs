//! Result and error types for Esperar.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Result type for wait operations
pub type WaitResult<T> = Result<T, WaitError>;

/// Kinds of errors a session query or condition can raise.
///
/// The set is deliberately enumerated: a wait declares exactly which kinds it
/// tolerates via [`crate::WaitConfig::ignoring`], instead of catching a broad
/// error hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No element matched the locator
    NotFound,
    /// Element handle refers to a node that left the DOM
    Stale,
    /// Element exists but is not rendered/visible
    NotVisible,
    /// Element is visible but cannot receive input
    NotInteractable,
    /// Another element would receive the click
    ClickIntercepted,
    /// Script evaluation inside the page failed
    JavascriptError,
    /// Target window or tab no longer exists
    NoSuchWindow,
    /// Locator was structurally invalid for the session
    InvalidSelector,
    /// Session/browser connection is gone
    SessionClosed,
    /// Transport-level I/O failure
    Io,
    /// Anything the session cannot classify
    Other,
}

impl ErrorKind {
    /// Get the kind name string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::Stale => "stale element",
            Self::NotVisible => "not visible",
            Self::NotInteractable => "not interactable",
            Self::ClickIntercepted => "click intercepted",
            Self::JavascriptError => "javascript error",
            Self::NoSuchWindow => "no such window",
            Self::InvalidSelector => "invalid selector",
            Self::SessionClosed => "session closed",
            Self::Io => "io error",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised by a session query or by a condition while it inspects the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct QueryError {
    /// Classification used by the wait loop's ignore policy
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl QueryError {
    /// Create a new query error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`ErrorKind::NotFound`] error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Shorthand for a [`ErrorKind::Stale`] error
    pub fn stale(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Stale, message)
    }
}

/// Errors surfaced by a wait call.
///
/// Transient errors whose kind is in the wait's ignore set never appear here
/// directly; the most recent one is folded into [`WaitError::Timeout`] for
/// diagnostics.
#[derive(Debug, Clone, Error)]
pub enum WaitError {
    /// Deadline elapsed before the condition was satisfied
    #[error(
        "timed out after {}ms waiting for {condition}{}",
        elapsed.as_millis(),
        last_error
            .as_ref()
            .map(|e| format!(" (last error: {e})"))
            .unwrap_or_default()
    )]
    Timeout {
        /// Description of the condition that never held
        condition: String,
        /// Wall-clock time spent polling
        elapsed: Duration,
        /// Most recent ignored error observed while polling, if any
        last_error: Option<QueryError>,
    },

    /// Condition raised an error whose kind was not in the ignore set
    #[error(transparent)]
    Condition(#[from] QueryError),
}

impl WaitError {
    /// Check whether this is a timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Last transient error observed before a timeout, if any
    #[must_use]
    pub const fn last_error(&self) -> Option<&QueryError> {
        match self {
            Self::Timeout { last_error, .. } => last_error.as_ref(),
            Self::Condition(_) => None,
        }
    }
}
