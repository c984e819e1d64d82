//! Locator representation for element selection.
//!
//! A [`Locator`] names a strategy and a target; interpreting it (CSS/XPath
//! evaluation, attribute matching) is entirely the session's job. Nothing in
//! this crate parses selector syntax.

/// Strategy + target pair handed to [`crate::Session::find`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
    /// Tag name (e.g., "a", "form")
    TagName(String),
    /// Exact anchor text
    LinkText(String),
    /// Substring of anchor text
    PartialLinkText(String),
    /// data-testid attribute
    TestId(String),
}

impl Locator {
    /// Create a CSS selector locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Create an id locator
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a name-attribute locator
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Create a tag-name locator
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Create an exact link-text locator
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Create a partial link-text locator
    #[must_use]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Create a test ID locator (data-testid attribute)
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Get the strategy name string
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css selector",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::TagName(_) => "tag name",
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
            Self::TestId(_) => "test id",
        }
    }

    /// Get the target the strategy applies to
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Css(s)
            | Self::XPath(s)
            | Self::Id(s)
            | Self::Name(s)
            | Self::TagName(s)
            | Self::LinkText(s)
            | Self::PartialLinkText(s)
            | Self::TestId(s) => s,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.strategy(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Locator::css("button"), Locator::Css("button".into()));
        assert_eq!(Locator::id("save"), Locator::Id("save".into()));
        assert_eq!(Locator::tag_name("body"), Locator::TagName("body".into()));
        assert_eq!(
            Locator::name("search_query"),
            Locator::Name("search_query".into())
        );
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Locator::css("x").strategy(), "css selector");
        assert_eq!(Locator::xpath("//a").strategy(), "xpath");
        assert_eq!(Locator::test_id("save").strategy(), "test id");
        assert_eq!(Locator::partial_link_text("more").strategy(), "partial link text");
    }

    #[test]
    fn test_target() {
        assert_eq!(Locator::css("button.primary").target(), "button.primary");
        assert_eq!(Locator::link_text("Sign in").target(), "Sign in");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Locator::css("button.primary")),
            "css selector \"button.primary\""
        );
        assert_eq!(format!("{}", Locator::id("video-title")), "id \"video-title\"");
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut seen = std::collections::HashSet::new();
        seen.insert(Locator::css("a"));
        assert!(seen.contains(&Locator::css("a")));
        assert!(!seen.contains(&Locator::xpath("a")));
    }
}
