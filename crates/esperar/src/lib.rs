//! Esperar: explicit-wait toolkit for UI test synchronization
//!
//! Esperar (Spanish: "to wait") provides the condition-polling layer of a
//! browser-automation stack: a deadline-bounded waiter, a library of
//! expected conditions, retry helpers, and page-object support. The browser
//! itself stays behind the [`Session`] trait; an in-memory [`mock::MockPage`]
//! ships for tests.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    ESPERAR Architecture                       │
//! ├───────────────────────────────────────────────────────────────┤
//! │   ┌───────────┐    ┌───────────┐    ┌─────────────────────┐   │
//! │   │ Condition │    │ Waiter    │    │ Session (trait)     │   │
//! │   │ expected::│───►│ poll loop │───►│ browser page / mock │   │
//! │   │ + custom  │    │ + ignore  │    │                     │   │
//! │   └───────────┘    └───────────┘    └─────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use esperar::{expected, Locator, WaitConfig, Waiter};
//! use esperar::mock::MockPage;
//! use std::time::Duration;
//!
//! let page = MockPage::new();
//! page.insert_element(Locator::name("search_query"));
//!
//! let waiter = Waiter::with_config(&page, WaitConfig::new(Duration::from_secs(1)));
//! let search_box = waiter
//!     .until(expected::presence_of_element(Locator::name("search_query")))
//!     .expect("search box should appear");
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod locator;
mod page;
mod result;
mod retry;
mod session;
mod wait;

pub mod expected;
pub mod mock;

pub use locator::Locator;
pub use page::{wait_for_page, PageObject};
pub use result::{ErrorKind, QueryError, WaitError, WaitResult};
pub use retry::{retry_on, retry_on_stale, RetryPolicy, RetryReport};
pub use session::{ElementState, Session};
pub use wait::{
    not, wait_until, And, Condition, FnCondition, Not, Or, WaitConfig, Waiter,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Commonly used imports for test code
pub mod prelude {
    pub use super::expected;
    pub use super::mock::{MockElement, MockPage};
    pub use super::{
        not, retry_on, retry_on_stale, wait_for_page, wait_until, Condition, ElementState,
        ErrorKind, FnCondition, Locator, PageObject, QueryError, RetryPolicy, RetryReport,
        Session, WaitConfig, WaitError, WaitResult, Waiter,
    };
}
