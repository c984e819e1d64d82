//! In-memory session fake for tests and examples.
//!
//! [`MockPage`] implements [`Session`] over shared mutable state, so a test
//! can hand the page to a waiter on one thread and mutate it from another:
//! insert or remove elements, toggle visibility, mark handles stale, or
//! inject a failure of an arbitrary [`ErrorKind`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::locator::Locator;
use crate::result::{ErrorKind, QueryError};
use crate::session::{ElementState, Session};

#[derive(Debug)]
struct ElementRecord {
    displayed: bool,
    enabled: bool,
    text: String,
    attributes: HashMap<String, String>,
    stale: bool,
}

impl Default for ElementRecord {
    fn default() -> Self {
        Self {
            displayed: true,
            enabled: true,
            text: String::new(),
            attributes: HashMap::new(),
            stale: false,
        }
    }
}

#[derive(Debug)]
struct PageState {
    title: String,
    url: String,
    elements: HashMap<Locator, Vec<Arc<Mutex<ElementRecord>>>>,
    failure: Option<QueryError>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: "about:blank".to_string(),
            elements: HashMap::new(),
            failure: None,
        }
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared-state fake page implementing [`Session`].
///
/// Cloning yields another handle to the same underlying page.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    state: Arc<Mutex<PageState>>,
}

impl MockPage {
    /// Create an empty page (blank url, no elements)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title
    pub fn set_title(&self, title: impl Into<String>) {
        locked(&self.state).title = title.into();
    }

    /// Set the document URL
    pub fn set_url(&self, url: impl Into<String>) {
        locked(&self.state).url = url.into();
    }

    /// Insert an element reachable via `locator` and return its handle.
    ///
    /// The element starts displayed and enabled; adjust it through the
    /// returned [`MockElement`].
    pub fn insert_element(&self, locator: Locator) -> MockElement {
        let record = Arc::new(Mutex::new(ElementRecord::default()));
        locked(&self.state)
            .elements
            .entry(locator)
            .or_default()
            .push(Arc::clone(&record));
        MockElement { record }
    }

    /// Remove every element under `locator`, marking their handles stale
    pub fn remove_elements(&self, locator: &Locator) {
        if let Some(records) = locked(&self.state).elements.remove(locator) {
            for record in records {
                locked(&record).stale = true;
            }
        }
    }

    /// Make every subsequent query fail with `error` until cleared
    pub fn inject_failure(&self, error: QueryError) {
        locked(&self.state).failure = Some(error);
    }

    /// Clear an injected failure
    pub fn clear_failure(&self) {
        locked(&self.state).failure = None;
    }

    fn check_failure(&self) -> Result<(), QueryError> {
        match locked(&self.state).failure.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Session for MockPage {
    type Element = MockElement;

    fn find(&self, locator: &Locator) -> Result<Self::Element, QueryError> {
        self.check_failure()?;
        locked(&self.state)
            .elements
            .get(locator)
            .into_iter()
            .flatten()
            .find(|record| !locked(record).stale)
            .map(|record| MockElement {
                record: Arc::clone(record),
            })
            .ok_or_else(|| QueryError::not_found(format!("no element located by {locator}")))
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, QueryError> {
        self.check_failure()?;
        Ok(locked(&self.state)
            .elements
            .get(locator)
            .into_iter()
            .flatten()
            .filter(|record| !locked(record).stale)
            .map(|record| MockElement {
                record: Arc::clone(record),
            })
            .collect())
    }

    fn title(&self) -> Result<String, QueryError> {
        self.check_failure()?;
        Ok(locked(&self.state).title.clone())
    }

    fn current_url(&self) -> Result<String, QueryError> {
        self.check_failure()?;
        Ok(locked(&self.state).url.clone())
    }
}

/// Handle to a single mock element.
///
/// Clones share the same record; state changes are visible to every handle
/// and to in-flight waits.
#[derive(Debug, Clone)]
pub struct MockElement {
    record: Arc<Mutex<ElementRecord>>,
}

impl MockElement {
    /// Toggle visibility
    pub fn set_displayed(&self, displayed: bool) {
        locked(&self.record).displayed = displayed;
    }

    /// Toggle interactability
    pub fn set_enabled(&self, enabled: bool) {
        locked(&self.record).enabled = enabled;
    }

    /// Replace the text content
    pub fn set_text(&self, text: impl Into<String>) {
        locked(&self.record).text = text.into();
    }

    /// Set an attribute value
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        locked(&self.record)
            .attributes
            .insert(name.into(), value.into());
    }

    /// Detach this element: every later state query through any handle
    /// fails with [`ErrorKind::Stale`]
    pub fn mark_stale(&self) {
        locked(&self.record).stale = true;
    }

    fn read<T>(&self, get: impl FnOnce(&ElementRecord) -> T) -> Result<T, QueryError> {
        let record = locked(&self.record);
        if record.stale {
            return Err(QueryError::new(
                ErrorKind::Stale,
                "element is no longer attached to the page",
            ));
        }
        Ok(get(&record))
    }
}

impl ElementState for MockElement {
    fn is_displayed(&self) -> Result<bool, QueryError> {
        self.read(|r| r.displayed)
    }

    fn is_enabled(&self) -> Result<bool, QueryError> {
        self.read(|r| r.enabled)
    }

    fn text(&self) -> Result<String, QueryError> {
        self.read(|r| r.text.clone())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, QueryError> {
        self.read(|r| r.attributes.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod page_tests {
        use super::*;

        #[test]
        fn test_empty_page() {
            let page = MockPage::new();
            assert_eq!(page.current_url().unwrap(), "about:blank");
            assert_eq!(page.title().unwrap(), "");
            let err = page.find(&Locator::css("#missing")).unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
        }

        #[test]
        fn test_find_inserted_element() {
            let page = MockPage::new();
            page.insert_element(Locator::id("save"));
            let el = page.find(&Locator::id("save")).unwrap();
            assert!(el.is_displayed().unwrap());
            assert!(el.is_enabled().unwrap());
        }

        #[test]
        fn test_find_all() {
            let page = MockPage::new();
            page.insert_element(Locator::tag_name("a"));
            page.insert_element(Locator::tag_name("a"));
            assert_eq!(page.find_all(&Locator::tag_name("a")).unwrap().len(), 2);
            assert!(page.find_all(&Locator::tag_name("form")).unwrap().is_empty());
        }

        #[test]
        fn test_remove_marks_handles_stale() {
            let page = MockPage::new();
            let el = page.insert_element(Locator::id("banner"));
            page.remove_elements(&Locator::id("banner"));
            assert_eq!(
                page.find(&Locator::id("banner")).unwrap_err().kind,
                ErrorKind::NotFound
            );
            assert_eq!(el.is_displayed().unwrap_err().kind, ErrorKind::Stale);
        }

        #[test]
        fn test_injected_failure_hits_every_query() {
            let page = MockPage::new();
            page.insert_element(Locator::id("save"));
            page.inject_failure(QueryError::new(ErrorKind::SessionClosed, "crashed"));
            assert_eq!(
                page.find(&Locator::id("save")).unwrap_err().kind,
                ErrorKind::SessionClosed
            );
            assert_eq!(page.title().unwrap_err().kind, ErrorKind::SessionClosed);
            page.clear_failure();
            assert!(page.find(&Locator::id("save")).is_ok());
        }

        #[test]
        fn test_clone_shares_state() {
            let page = MockPage::new();
            let other = page.clone();
            other.set_url("https://example.com/login");
            assert_eq!(page.current_url().unwrap(), "https://example.com/login");
        }
    }

    mod element_tests {
        use super::*;

        #[test]
        fn test_state_toggles() {
            let page = MockPage::new();
            let el = page.insert_element(Locator::css("button"));
            el.set_displayed(false);
            el.set_enabled(false);
            el.set_text("Submit");
            let found = page.find(&Locator::css("button")).unwrap();
            assert!(!found.is_displayed().unwrap());
            assert!(!found.is_enabled().unwrap());
            assert_eq!(found.text().unwrap(), "Submit");
        }

        #[test]
        fn test_attributes() {
            let page = MockPage::new();
            let el = page.insert_element(Locator::css("input"));
            el.set_attribute("type", "email");
            assert_eq!(el.attribute("type").unwrap().as_deref(), Some("email"));
            assert_eq!(el.attribute("placeholder").unwrap(), None);
        }

        #[test]
        fn test_stale_handle_fails_all_queries() {
            let page = MockPage::new();
            let el = page.insert_element(Locator::css("div"));
            el.mark_stale();
            assert_eq!(el.text().unwrap_err().kind, ErrorKind::Stale);
            assert_eq!(el.attribute("id").unwrap_err().kind, ErrorKind::Stale);
        }
    }
}
