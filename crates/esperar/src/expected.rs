//! Ready-made conditions for the common "wait until the page ..." cases.
//!
//! Each helper returns an `impl Condition` with a diagnostic description.
//! Absence of an element counts as "not ready yet" here (`Ok(None)`), so
//! these conditions poll cleanly with an empty ignore set; stale handles and
//! session failures still surface through the error channel and follow the
//! wait's ignore policy.
//!
//! ```
//! use esperar::{expected, Locator, WaitConfig, Waiter};
//! use esperar::mock::MockPage;
//!
//! let page = MockPage::new();
//! page.insert_element(Locator::id("save"));
//! let waiter = Waiter::with_config(&page, WaitConfig::fast());
//! let button = waiter.until(expected::element_clickable(Locator::id("save"))).unwrap();
//! ```

use crate::locator::Locator;
use crate::result::{ErrorKind, QueryError};
use crate::session::{ElementState, Session};
use crate::wait::{Condition, FnCondition};

fn absent_as_pending<T>(result: Result<T, QueryError>) -> Result<Option<T>, QueryError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// The element is attached to the page, visible or not
pub fn presence_of_element<S: Session>(
    locator: Locator,
) -> impl Condition<S, Output = S::Element> {
    let description = format!("presence of element located by {locator}");
    FnCondition::new(
        move |session: &S| absent_as_pending(session.find(&locator)),
        description,
    )
}

/// At least one element matches; yields all of them
pub fn presence_of_all_elements<S: Session>(
    locator: Locator,
) -> impl Condition<S, Output = Vec<S::Element>> {
    let description = format!("presence of all elements located by {locator}");
    FnCondition::new(
        move |session: &S| {
            let elements = session.find_all(&locator)?;
            Ok((!elements.is_empty()).then_some(elements))
        },
        description,
    )
}

/// The element is present and displayed
pub fn visibility_of_element<S: Session>(
    locator: Locator,
) -> impl Condition<S, Output = S::Element> {
    let description = format!("visibility of element located by {locator}");
    FnCondition::new(
        move |session: &S| {
            let Some(element) = absent_as_pending(session.find(&locator))? else {
                return Ok(None);
            };
            Ok(element.is_displayed()?.then_some(element))
        },
        description,
    )
}

/// The element is absent, or present but hidden
pub fn invisibility_of_element<S: Session>(locator: Locator) -> impl Condition<S, Output = bool> {
    let description = format!("invisibility of element located by {locator}");
    FnCondition::new(
        move |session: &S| match session.find(&locator) {
            Ok(element) => match element.is_displayed() {
                Ok(displayed) => Ok((!displayed).then_some(true)),
                // the element left the DOM between find and the state query
                Err(e) if e.kind == ErrorKind::Stale => Ok(Some(true)),
                Err(e) => Err(e),
            },
            Err(e) if matches!(e.kind, ErrorKind::NotFound | ErrorKind::Stale) => Ok(Some(true)),
            Err(e) => Err(e),
        },
        description,
    )
}

/// The element is displayed and enabled, so a click would land
pub fn element_clickable<S: Session>(locator: Locator) -> impl Condition<S, Output = S::Element> {
    let description = format!("element located by {locator} to be clickable");
    FnCondition::new(
        move |session: &S| {
            let Some(element) = absent_as_pending(session.find(&locator))? else {
                return Ok(None);
            };
            let actionable = element.is_displayed()? && element.is_enabled()?;
            Ok(actionable.then_some(element))
        },
        description,
    )
}

/// A previously obtained handle has gone stale (its node left the DOM)
pub fn staleness_of<S: Session>(element: S::Element) -> impl Condition<S, Output = bool> {
    FnCondition::new(
        move |_: &S| match element.is_displayed() {
            Ok(_) => Ok(None),
            Err(e) if e.kind == ErrorKind::Stale => Ok(Some(true)),
            Err(e) => Err(e),
        },
        "staleness of element",
    )
}

/// The element's text contains `needle`
pub fn text_in_element<S: Session>(
    locator: Locator,
    needle: impl Into<String>,
) -> impl Condition<S, Output = String> {
    let needle = needle.into();
    let description = format!("text {needle:?} in element located by {locator}");
    FnCondition::new(
        move |session: &S| {
            let Some(element) = absent_as_pending(session.find(&locator))? else {
                return Ok(None);
            };
            let text = element.text()?;
            Ok(text.contains(&needle).then_some(text))
        },
        description,
    )
}

/// The document title equals `title` exactly
pub fn title_is<S: Session>(title: impl Into<String>) -> impl Condition<S, Output = String> {
    let title = title.into();
    let description = format!("title to be {title:?}");
    FnCondition::new(
        move |session: &S| {
            let current = session.title()?;
            Ok((current == title).then_some(current))
        },
        description,
    )
}

/// The document title contains `fragment`
pub fn title_contains<S: Session>(
    fragment: impl Into<String>,
) -> impl Condition<S, Output = String> {
    let fragment = fragment.into();
    let description = format!("title to contain {fragment:?}");
    FnCondition::new(
        move |session: &S| {
            let current = session.title()?;
            Ok(current.contains(&fragment).then_some(current))
        },
        description,
    )
}

/// The current URL contains `fragment`
pub fn url_contains<S: Session>(
    fragment: impl Into<String>,
) -> impl Condition<S, Output = String> {
    let fragment = fragment.into();
    let description = format!("url to contain {fragment:?}");
    FnCondition::new(
        move |session: &S| {
            let current = session.current_url()?;
            Ok(current.contains(&fragment).then_some(current))
        },
        description,
    )
}
