//! Element references and query results.

use serde::{Deserialize, Serialize};

/// Logical reference to an element, resolved to a selector by a bridge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    /// Logical identifier handed to the bridge
    pub value: String,
    /// Selector suffix appended after the bridge's selector
    pub filter: String,
    /// Scope selector passed through to the driver
    pub context: Option<String>,
}

impl Target {
    /// Create a target for a logical identifier
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            filter: String::new(),
            context: None,
        }
    }

    /// Append a selector suffix such as `:first`
    #[must_use]
    pub fn filter(mut self, filter: impl AsRef<str>) -> Self {
        self.filter.push_str(filter.as_ref());
        self
    }

    /// Restrict matches to text containing `text`
    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        self.filter(contains_filter(text))
    }

    /// Scope the query to elements inside `context`
    #[must_use]
    pub fn within(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for Target {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

/// Text-matching pseudo selector
#[must_use]
pub fn contains_filter(text: &str) -> String {
    format!(":contains(\"{text}\")")
}

/// Element handle returned by the driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Text content
    pub text_content: Option<String>,
    /// CSS classes on the element
    pub classes: Vec<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            classes: Vec::new(),
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Add a CSS class
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Whether the element carries `class`
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Ordered collection of matched elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSet {
    elements: Vec<ElementHandle>,
}

impl ElementSet {
    /// Empty result
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap matched elements
    #[must_use]
    pub fn new(elements: Vec<ElementHandle>) -> Self {
        Self { elements }
    }

    /// Number of matches
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether any matched element carries `class`
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.elements.iter().any(|e| e.has_class(class))
    }

    /// Combined text of all matched elements
    #[must_use]
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|e| e.text_content.as_deref())
            .collect()
    }

    /// First match
    #[must_use]
    pub fn first(&self) -> Option<&ElementHandle> {
        self.elements.first()
    }

    /// Iterate over matches
    pub fn iter(&self) -> std::slice::Iter<'_, ElementHandle> {
        self.elements.iter()
    }
}

impl From<Vec<ElementHandle>> for ElementSet {
    fn from(elements: Vec<ElementHandle>) -> Self {
        Self::new(elements)
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = &'a ElementHandle;
    type IntoIter = std::slice::Iter<'a, ElementHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod target_tests {
        use super::*;

        #[test]
        fn test_from_str() {
            let target: Target = "save".into();
            assert_eq!(target.value, "save");
            assert!(target.filter.is_empty());
            assert!(target.context.is_none());
        }

        #[test]
        fn test_with_text_appends_contains() {
            let target = Target::new("row").filter(":first").with_text("Submit");
            assert_eq!(target.filter, r#":first:contains("Submit")"#);
        }

        #[test]
        fn test_within() {
            let target = Target::new("name").within("#signup");
            assert_eq!(target.context.as_deref(), Some("#signup"));
        }
    }

    mod element_set_tests {
        use super::*;

        fn sample() -> ElementSet {
            ElementSet::new(vec![
                ElementHandle::new("1", "li").with_text("Hello, ").with_class("active"),
                ElementHandle::new("2", "li").with_text("world"),
            ])
        }

        #[test]
        fn test_len_and_empty() {
            assert_eq!(sample().len(), 2);
            assert!(ElementSet::empty().is_empty());
        }

        #[test]
        fn test_has_class_matches_any() {
            let set = sample();
            assert!(set.has_class("active"));
            assert!(!set.has_class("hidden"));
        }

        #[test]
        fn test_text_concatenates() {
            assert_eq!(sample().text(), "Hello, world");
            assert_eq!(ElementSet::empty().text(), "");
        }

        #[test]
        fn test_iteration() {
            let set = sample();
            let ids: Vec<&str> = set.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2"]);
            assert_eq!(set.first().map(|e| e.tag_name.as_str()), Some("li"));
        }
    }
}
