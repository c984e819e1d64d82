//! Session abstraction: the external collaborator a wait polls against.
//!
//! The browser (or any other queryable UI surface) stays behind these traits.
//! Conditions receive the session explicitly on every evaluation; there is no
//! ambient "current driver" state anywhere in the crate.

use crate::locator::Locator;
use crate::result::QueryError;

/// State queries on a located element.
///
/// Every method is fallible: a handle can outlive the node it points at, in
/// which case implementations return [`crate::ErrorKind::Stale`].
pub trait ElementState {
    /// Whether the element is rendered and visible
    fn is_displayed(&self) -> Result<bool, QueryError>;

    /// Whether the element accepts interaction (not disabled)
    fn is_enabled(&self) -> Result<bool, QueryError>;

    /// Visible text content
    fn text(&self) -> Result<String, QueryError>;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, name: &str) -> Result<Option<String>, QueryError>;
}

/// A queryable UI session (a browser page, or a fake standing in for one).
///
/// `find` signals absence with [`crate::ErrorKind::NotFound`] rather than an
/// `Option`, so absence flows through the same channel as every other
/// session failure and the wait loop's ignore policy applies uniformly.
pub trait Session {
    /// Handle type for located elements
    type Element: ElementState;

    /// Locate the first element matching `locator`
    fn find(&self, locator: &Locator) -> Result<Self::Element, QueryError>;

    /// Locate every element matching `locator` (empty vec when none match)
    fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, QueryError>;

    /// Current document title
    fn title(&self) -> Result<String, QueryError>;

    /// Current document URL
    fn current_url(&self) -> Result<String, QueryError>;
}
