//! Driver - the browser capabilities a page object consumes.
//!
//! Navigation, interaction and DOM queries are injected rather than assumed
//! to exist as ambient helpers, so any backend (a CDP session, a WebDriver
//! client, an in-process DOM) can sit behind a page object, and unit tests
//! can use [`MockDriver`].

use crate::element::{ElementHandle, ElementSet};
use crate::result::{PageError, PageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Browser automation capabilities
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to `url`
    async fn visit(&mut self, url: &str) -> PageResult<()>;

    /// Click the element matching `selector`, optionally inside `context`
    async fn click(&mut self, selector: &str, context: Option<&str>) -> PageResult<()>;

    /// Type `text` into the element matching `selector`
    async fn fill_in(&mut self, selector: &str, context: Option<&str>, text: &str)
        -> PageResult<()>;

    /// Query all elements matching `selector`
    async fn find(&self, selector: &str, context: Option<&str>) -> PageResult<ElementSet>;

    /// URL of the current page
    async fn current_url(&self) -> PageResult<String>;

    /// Halt the test so the page can be inspected
    async fn pause_test(&mut self) -> PageResult<()>;

    /// Resize the element hosting the application under test
    async fn resize_container(&mut self, selector: &str, width: &str, height: &str)
        -> PageResult<()>;
}

/// A call recorded by [`MockDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `visit(url)`
    Visit {
        /// Target URL
        url: String,
    },
    /// `click(selector, context)`
    Click {
        /// Resolved selector
        selector: String,
        /// Scope selector
        context: Option<String>,
    },
    /// `fill_in(selector, context, text)`
    FillIn {
        /// Resolved selector
        selector: String,
        /// Scope selector
        context: Option<String>,
        /// Text typed
        text: String,
    },
    /// `find(selector, context)`
    Find {
        /// Resolved selector
        selector: String,
        /// Scope selector
        context: Option<String>,
    },
    /// `current_url()`
    CurrentUrl,
    /// `pause_test()`
    PauseTest,
    /// `resize_container(selector, width, height)`
    ResizeContainer {
        /// Container selector
        selector: String,
        /// CSS width
        width: String,
        /// CSS height
        height: String,
    },
}

impl DriverCall {
    /// Method name of the call
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visit { .. } => "visit",
            Self::Click { .. } => "click",
            Self::FillIn { .. } => "fill_in",
            Self::Find { .. } => "find",
            Self::CurrentUrl => "current_url",
            Self::PauseTest => "pause_test",
            Self::ResizeContainer { .. } => "resize_container",
        }
    }
}

/// Mock driver for unit testing
///
/// Elements are registered per selector; `visit` sets the current URL.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    elements: HashMap<String, Vec<ElementHandle>>,
    failing_selectors: Vec<String>,
    history: Mutex<Vec<DriverCall>>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element returned for `selector`
    pub fn add_element(&mut self, selector: impl Into<String>, element: ElementHandle) {
        self.elements.entry(selector.into()).or_default().push(element);
    }

    /// Builder form of [`MockDriver::add_element`]
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, element: ElementHandle) -> Self {
        self.add_element(selector, element);
        self
    }

    /// Make interactions with `selector` fail
    #[must_use]
    pub fn failing_on(mut self, selector: impl Into<String>) -> Self {
        self.failing_selectors.push(selector.into());
        self
    }

    /// Set the URL reported by `current_url`
    #[must_use]
    pub fn at_url(mut self, url: impl Into<String>) -> Self {
        self.current_url = url.into();
        self
    }

    /// Recorded calls, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<DriverCall> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history().iter().any(|c| c.name() == method)
    }

    /// Recorded calls of one method
    #[must_use]
    pub fn calls_to(&self, method: &str) -> Vec<DriverCall> {
        self.history()
            .into_iter()
            .filter(|c| c.name() == method)
            .collect()
    }

    fn record(&self, call: DriverCall) {
        if let Ok(mut history) = self.history.lock() {
            history.push(call);
        }
    }

    fn check_failure(&self, selector: &str) -> PageResult<()> {
        if self.failing_selectors.iter().any(|s| s == selector) {
            return Err(PageError::driver(format!("mock failure on {selector}")));
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn visit(&mut self, url: &str) -> PageResult<()> {
        self.record(DriverCall::Visit {
            url: url.to_string(),
        });
        self.current_url = url.to_string();
        Ok(())
    }

    async fn click(&mut self, selector: &str, context: Option<&str>) -> PageResult<()> {
        self.record(DriverCall::Click {
            selector: selector.to_string(),
            context: context.map(str::to_string),
        });
        self.check_failure(selector)
    }

    async fn fill_in(
        &mut self,
        selector: &str,
        context: Option<&str>,
        text: &str,
    ) -> PageResult<()> {
        self.record(DriverCall::FillIn {
            selector: selector.to_string(),
            context: context.map(str::to_string),
            text: text.to_string(),
        });
        self.check_failure(selector)
    }

    async fn find(&self, selector: &str, context: Option<&str>) -> PageResult<ElementSet> {
        self.record(DriverCall::Find {
            selector: selector.to_string(),
            context: context.map(str::to_string),
        });
        Ok(self
            .elements
            .get(selector)
            .cloned()
            .map(ElementSet::new)
            .unwrap_or_default())
    }

    async fn current_url(&self) -> PageResult<String> {
        self.record(DriverCall::CurrentUrl);
        Ok(self.current_url.clone())
    }

    async fn pause_test(&mut self) -> PageResult<()> {
        self.record(DriverCall::PauseTest);
        Ok(())
    }

    async fn resize_container(
        &mut self,
        selector: &str,
        width: &str,
        height: &str,
    ) -> PageResult<()> {
        self.record(DriverCall::ResizeContainer {
            selector: selector.to_string(),
            width: width.to_string(),
            height: height.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mock_driver_tests {
        use super::*;

        #[test]
        fn test_mock_driver_creation() {
            let driver = MockDriver::new();
            assert!(driver.current_url.is_empty());
            assert!(driver.history().is_empty());
            assert!(!driver.was_called("visit"));
        }

        #[test]
        fn test_call_names() {
            assert_eq!(DriverCall::PauseTest.name(), "pause_test");
            assert_eq!(
                DriverCall::Visit {
                    url: "/".to_string()
                }
                .name(),
                "visit"
            );
        }

        #[tokio::test]
        async fn test_visit_sets_current_url() {
            let mut driver = MockDriver::new();
            driver.visit("/posts/1").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "/posts/1");
            assert!(driver.was_called("visit"));
            assert!(driver.was_called("current_url"));
        }

        #[tokio::test]
        async fn test_find_returns_registered_elements() {
            let driver = MockDriver::new()
                .with_element("#a", ElementHandle::new("1", "div"))
                .with_element("#a", ElementHandle::new("2", "div"));

            let found = driver.find("#a", None).await.unwrap();
            assert_eq!(found.len(), 2);

            let missing = driver.find("#b", Some("#ctx")).await.unwrap();
            assert!(missing.is_empty());
            assert_eq!(
                driver.calls_to("find").last(),
                Some(&DriverCall::Find {
                    selector: "#b".to_string(),
                    context: Some("#ctx".to_string()),
                })
            );
        }

        #[tokio::test]
        async fn test_failing_selector() {
            let mut driver = MockDriver::new().failing_on("#broken");
            assert!(driver.click("#ok", None).await.is_ok());
            let err = driver.click("#broken", None).await.unwrap_err();
            assert!(matches!(err, PageError::Driver { .. }));
            assert!(driver.fill_in("#broken", None, "x").await.is_err());
        }

        #[tokio::test]
        async fn test_history_order() {
            let mut driver = MockDriver::new();
            driver.visit("/").await.unwrap();
            driver.fill_in("#q", None, "rust").await.unwrap();
            driver.pause_test().await.unwrap();
            driver
                .resize_container("#host", "100vw", "100vh")
                .await
                .unwrap();

            let names: Vec<&str> = driver.history().iter().map(DriverCall::name).collect();
            assert_eq!(names, vec!["visit", "fill_in", "pause_test", "resize_container"]);
        }
    }
}
