//! Page Object Model support.
//!
//! A page object names the URL it lives at and what "loaded" means for it;
//! [`wait_for_page`] turns that into a single wait. Locator fields plus an
//! implementation of this trait keep per-page query logic out of the tests
//! themselves.

use std::time::Duration;

use crate::result::{QueryError, WaitResult};
use crate::session::Session;
use crate::wait::{FnCondition, WaitConfig, Waiter, DEFAULT_WAIT_TIMEOUT_MS};

/// A page or component in the UI under test.
///
/// # Example
///
/// ```
/// use esperar::{ElementState, Locator, PageObject, QueryError, Session};
///
/// struct LoginPage {
///     submit_button: Locator,
/// }
///
/// impl<S: Session> PageObject<S> for LoginPage {
///     fn url_pattern(&self) -> &str {
///         "/login"
///     }
///
///     fn ready(&self, session: &S) -> Result<Option<()>, QueryError> {
///         match session.find(&self.submit_button) {
///             Ok(el) => Ok(el.is_displayed()?.then_some(())),
///             Err(e) if e.kind == esperar::ErrorKind::NotFound => Ok(None),
///             Err(e) => Err(e),
///         }
///     }
/// }
/// ```
pub trait PageObject<S: Session> {
    /// URL fragment that identifies this page (e.g., "/login")
    fn url_pattern(&self) -> &str;

    /// Whether the page is ready for interaction.
    ///
    /// Same contract as a condition check: `Ok(Some(()))` when loaded,
    /// `Ok(None)` when not yet. Defaults to ready as soon as the URL matches.
    fn ready(&self, session: &S) -> Result<Option<()>, QueryError> {
        let _ = session;
        Ok(Some(()))
    }

    /// Timeout used by [`wait_for_page`]'s default config
    fn load_timeout(&self) -> Duration {
        Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS)
    }

    /// Page name for diagnostics
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Wait until the session's URL contains the page's pattern and the page
/// reports ready.
///
/// # Errors
///
/// Timeout or propagated session error, as with any wait.
pub fn wait_for_page<S, P>(session: &S, page: &P, config: &WaitConfig) -> WaitResult<()>
where
    S: Session,
    P: PageObject<S>,
{
    let pattern = page.url_pattern().to_string();
    let description = format!(
        "page {} at url containing {:?}",
        page.page_name(),
        pattern
    );
    let condition = FnCondition::new(
        move |s: &S| {
            let url = s.current_url()?;
            if !url.contains(&pattern) {
                return Ok(None);
            }
            page.ready(s)
        },
        description,
    );
    Waiter::with_config(session, config.clone()).until(condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;
    use crate::mock::MockPage;
    use crate::result::ErrorKind;
    use crate::session::ElementState;

    struct CheckoutPage {
        pay_button: Locator,
    }

    impl CheckoutPage {
        fn new() -> Self {
            Self {
                pay_button: Locator::css("button#pay"),
            }
        }
    }

    impl PageObject<MockPage> for CheckoutPage {
        fn url_pattern(&self) -> &str {
            "/checkout"
        }

        fn ready(&self, session: &MockPage) -> Result<Option<()>, QueryError> {
            match session.find(&self.pay_button) {
                Ok(el) => Ok(el.is_displayed()?.then_some(())),
                Err(e) if e.kind == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e),
            }
        }
    }

    struct BarePage;

    impl PageObject<MockPage> for BarePage {
        fn url_pattern(&self) -> &str {
            "/home"
        }
    }

    fn fast() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(100)).with_poll_interval(Duration::from_millis(10))
    }

    #[test]
    fn test_defaults() {
        let page = BarePage;
        assert_eq!(
            PageObject::<MockPage>::load_timeout(&page),
            Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS)
        );
        assert!(PageObject::<MockPage>::page_name(&page).contains("BarePage"));
    }

    #[test]
    fn test_default_ready_needs_only_url() {
        let session = MockPage::new();
        session.set_url("https://shop.example/home");
        assert!(wait_for_page(&session, &BarePage, &fast()).is_ok());
    }

    #[test]
    fn test_wrong_url_times_out() {
        let session = MockPage::new();
        session.set_url("https://shop.example/cart");
        let err = wait_for_page(&session, &BarePage, &fast()).unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_url_matches_but_not_ready() {
        let session = MockPage::new();
        session.set_url("https://shop.example/checkout");
        let err = wait_for_page(&session, &CheckoutPage::new(), &fast()).unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_becomes_ready_mid_wait() {
        let session = MockPage::new();
        session.set_url("https://shop.example/checkout");
        let background = session.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            background.insert_element(Locator::css("button#pay"));
        });
        assert!(wait_for_page(&session, &CheckoutPage::new(), &fast()).is_ok());
    }
}
