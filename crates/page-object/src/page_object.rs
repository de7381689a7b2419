//! Page objects: fluent, queued interactions and assertions.
//!
//! A [`PageObject`] wraps a [`Driver`], a [`Bridge`] and an
//! [`AssertionSink`]. Every interaction or assertion is appended to a FIFO
//! queue of steps; [`PageObject::run`] executes them one at a time, awaiting
//! each before starting the next.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug, Default)]
//! struct CommentPage;
//!
//! impl Page for CommentPage {
//!     fn url(&self) -> &str {
//!         "/posts/:postID/comments/:commentID"
//!     }
//! }
//!
//! let mut page = PageObject::builder(driver).page(CommentPage).build();
//! page.visit_segments(&UrlSegments::new().with("postID", 1).with("commentID", 2))
//!     .fill_in("comment-body", "First!")
//!     .click_button("save")
//!     .assert_has_text("comment-list", "First!");
//! page.run().await?;
//! ```

use crate::assertion::{AssertionSink, Observation, StrictAssert};
use crate::bridge::Bridge;
use crate::config::PageConfig;
use crate::driver::Driver;
use crate::element::{ElementSet, Target};
use crate::network::{MockServer, ResponseOptions};
use crate::result::{PageError, PageResult};
use crate::url::{replace_url_segments, UrlMatcher, UrlSegments};
use futures::future::BoxFuture;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// A page or component under test.
///
/// Implement this to give a page object its URL template; the default is
/// the application root.
pub trait Page: Send + Sync {
    /// URL template with `:name` segments (e.g. `"/users/:id"`)
    fn url(&self) -> &str {
        "/"
    }

    /// Page name for logging/debugging (default: the bare type name)
    fn page_name(&self) -> &str {
        short_type_name::<Self>()
    }
}

/// Type name without module path or generic arguments
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// The application root
#[derive(Debug, Clone, Copy, Default)]
pub struct RootPage;

impl Page for RootPage {}

/// A page described only by its URL template
#[derive(Debug, Clone)]
pub struct SimplePage {
    url: String,
    name: String,
}

impl SimplePage {
    /// Create a page for a URL template
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            url,
        }
    }

    /// Set the page name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Page for SimplePage {
    fn url(&self) -> &str {
        &self.url
    }

    fn page_name(&self) -> &str {
        &self.name
    }
}

/// Everything a queued step can reach
pub struct StepContext<'a, D> {
    /// Browser driver
    pub driver: &'a mut D,
    /// Selector bridge
    pub bridge: &'a dyn Bridge,
    /// Assertion sink
    pub assert: &'a dyn AssertionSink,
    /// Mock server, if one was attached
    pub server: Option<&'a dyn MockServer>,
    /// Page object configuration
    pub config: &'a PageConfig,
    /// Name of the page being driven
    pub page_name: &'a str,
    application: Option<&'a (dyn Any + Send + Sync)>,
}

impl<D: Driver> StepContext<'_, D> {
    /// Application handle, if one of type `T` was attached
    #[must_use]
    pub fn application<T: Any>(&self) -> Option<&T> {
        self.application.and_then(|app| app.downcast_ref::<T>())
    }

    /// Resolve a target through the bridge's default selector
    #[must_use]
    pub fn selector(&self, target: &Target) -> String {
        self.bridge.default_selector(&target.value, &target.filter)
    }

    /// Query the driver for a target
    pub async fn find(&self, target: &Target) -> PageResult<ElementSet> {
        let selector = self.selector(target);
        self.driver.find(&selector, target.context.as_deref()).await
    }
}

impl<D> fmt::Debug for StepContext<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepContext")
            .field("bridge", &self.bridge)
            .field("has_server", &self.server.is_some())
            .field("page_name", &self.page_name)
            .finish_non_exhaustive()
    }
}

type Step<D> =
    Box<dyn for<'a> FnOnce(StepContext<'a, D>) -> BoxFuture<'a, PageResult<()>> + Send>;

/// Which bridge capability resolves a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorKind {
    Default,
    Button,
    Link,
    Input,
}

impl SelectorKind {
    fn resolve(self, bridge: &dyn Bridge, target: &Target) -> String {
        let (value, filter) = (target.value.as_str(), target.filter.as_str());
        match self {
            Self::Default => bridge.default_selector(value, filter),
            Self::Button => bridge.button_selector(value, filter),
            Self::Link => bridge.link_selector(value, filter),
            Self::Input => bridge.input_selector(value, filter),
        }
    }
}

/// Observation made by an element assertion
#[derive(Debug, Clone)]
enum ElementCheck {
    Present,
    HasClass(String),
    HasText(String),
}

impl ElementCheck {
    fn observe(&self, found: &ElementSet) -> bool {
        match self {
            Self::Present => !found.is_empty(),
            Self::HasClass(class) => found.has_class(class),
            Self::HasText(text) => found.text().contains(text.as_str()),
        }
    }

    fn message(&self, selector: &str, expected: bool) -> String {
        match self {
            Self::Present => format!(
                "element with selector: '{selector}' {} present",
                if expected { "is" } else { "is not" }
            ),
            Self::HasClass(class) => format!(
                "element with selector: '{selector}' {} class: '{class}'",
                if expected { "has" } else { "does not have" }
            ),
            Self::HasText(text) => format!(
                "element with selector: '{selector}' containing text: '{text}' {}",
                if expected { "was found" } else { "was not found" }
            ),
        }
    }
}

/// Builder for [`PageObject`]
pub struct PageObjectBuilder<D, P = RootPage> {
    driver: D,
    page: P,
    bridge: Option<Box<dyn Bridge>>,
    assert: Option<Box<dyn AssertionSink>>,
    server: Option<Box<dyn MockServer>>,
    application: Option<Box<dyn Any + Send + Sync>>,
    config: PageConfig,
}

impl<D, P: fmt::Debug> fmt::Debug for PageObjectBuilder<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageObjectBuilder")
            .field("page", &self.page)
            .field("bridge", &self.bridge)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: Driver + 'static, P: Page> PageObjectBuilder<D, P> {
    /// Use a specific page
    #[must_use]
    pub fn page<Q: Page>(self, page: Q) -> PageObjectBuilder<D, Q> {
        PageObjectBuilder {
            driver: self.driver,
            page,
            bridge: self.bridge,
            assert: self.assert,
            server: self.server,
            application: self.application,
            config: self.config,
        }
    }

    /// Use a specific bridge instead of the configured one
    #[must_use]
    pub fn bridge(mut self, bridge: impl Bridge + 'static) -> Self {
        self.bridge = Some(Box::new(bridge));
        self
    }

    /// Use an already boxed bridge
    #[must_use]
    pub fn boxed_bridge(mut self, bridge: Box<dyn Bridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Send assertions to `sink` (default: [`StrictAssert`])
    #[must_use]
    pub fn assert(mut self, sink: impl AssertionSink + 'static) -> Self {
        self.assert = Some(Box::new(sink));
        self
    }

    /// Attach a mock HTTP server
    #[must_use]
    pub fn server(mut self, server: impl MockServer + 'static) -> Self {
        self.server = Some(Box::new(server));
        self
    }

    /// Attach the application handle exposed to steps
    #[must_use]
    pub fn application<T: Any + Send + Sync>(mut self, application: T) -> Self {
        self.application = Some(Box::new(application));
        self
    }

    /// Set the configuration
    #[must_use]
    pub fn config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the page object
    #[must_use]
    pub fn build(self) -> PageObject<D, P> {
        let Self {
            driver,
            page,
            bridge,
            assert,
            server,
            application,
            config,
        } = self;
        let bridge = bridge.unwrap_or_else(|| config.bridge.build());
        tracing::debug!(page = page.page_name(), ?bridge, "page object built");
        PageObject {
            driver,
            page,
            bridge,
            assert: assert.unwrap_or_else(|| Box::new(StrictAssert)),
            server,
            application,
            config,
            queue: VecDeque::new(),
        }
    }
}

/// Fluent façade over a driver, a bridge and an assertion sink
pub struct PageObject<D, P = RootPage> {
    driver: D,
    page: P,
    bridge: Box<dyn Bridge>,
    assert: Box<dyn AssertionSink>,
    server: Option<Box<dyn MockServer>>,
    application: Option<Box<dyn Any + Send + Sync>>,
    config: PageConfig,
    queue: VecDeque<Step<D>>,
}

impl<D, P: fmt::Debug> fmt::Debug for PageObject<D, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageObject")
            .field("page", &self.page)
            .field("bridge", &self.bridge)
            .field("has_server", &self.server.is_some())
            .field("config", &self.config)
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl<D: Driver + 'static> PageObject<D> {
    /// Start building a page object on `driver`
    #[must_use]
    pub fn builder(driver: D) -> PageObjectBuilder<D> {
        PageObjectBuilder {
            driver,
            page: RootPage,
            bridge: None,
            assert: None,
            server: None,
            application: None,
            config: PageConfig::default(),
        }
    }

    /// Root page object with every default
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::builder(driver).build()
    }
}

impl<D: Driver + 'static, P: Page> PageObject<D, P> {
    /// The driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// The driver, mutably
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the driver
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// The page description
    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// The selector bridge
    #[must_use]
    pub fn bridge(&self) -> &dyn Bridge {
        self.bridge.as_ref()
    }

    /// The configuration
    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Number of queued steps
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The page's URL template
    #[must_use]
    pub fn url(&self) -> &str {
        self.page.url()
    }

    /// Substitute segments into the page's URL template without navigating
    #[must_use]
    pub fn url_for_segments(&self, segments: &UrlSegments) -> String {
        replace_url_segments(self.page.url(), segments)
    }

    /// Queue a step; every other interaction is built on this
    pub fn and_then<F>(&mut self, step: F) -> &mut Self
    where
        F: for<'a> FnOnce(StepContext<'a, D>) -> BoxFuture<'a, PageResult<()>> + Send + 'static,
    {
        self.queue.push_back(Box::new(step));
        tracing::trace!(pending = self.queue.len(), "step queued");
        self
    }

    /// Execute queued steps in order.
    ///
    /// Returns the number of steps executed. On the first failing step the
    /// rest of the queue is discarded and the error returned.
    pub async fn run(&mut self) -> PageResult<usize> {
        let mut executed = 0;
        while let Some(step) = self.queue.pop_front() {
            let cx = StepContext {
                driver: &mut self.driver,
                bridge: self.bridge.as_ref(),
                assert: self.assert.as_ref(),
                server: self.server.as_deref(),
                config: &self.config,
                page_name: self.page.page_name(),
                application: self.application.as_deref(),
            };
            let outcome = step(cx).await;
            if let Err(err) = outcome {
                let discarded = self.queue.len();
                self.queue.clear();
                tracing::warn!(executed, discarded, error = %err, "step failed, queue discarded");
                return Err(err);
            }
            executed += 1;
        }
        tracing::debug!(executed, page = self.page.page_name(), "queue drained");
        Ok(executed)
    }

    // Navigation

    /// Navigate to a URL
    pub fn visit(&mut self, url: impl Into<String>) -> &mut Self {
        let url = url.into();
        self.and_then(move |cx| {
            Box::pin(async move {
                tracing::debug!(%url, "visit");
                cx.driver.visit(&url).await
            })
        })
    }

    /// Navigate to the page's URL template filled with `segments`
    pub fn visit_segments(&mut self, segments: &UrlSegments) -> &mut Self {
        let url = self.url_for_segments(segments);
        self.visit(url)
    }

    // Interactions

    /// Type `text` into the element for `target`
    pub fn fill_in(&mut self, target: impl Into<Target>, text: impl Into<String>) -> &mut Self {
        self.enqueue_fill(target.into(), text.into(), SelectorKind::Default, None)
    }

    /// Type `text`, then hand the filled element to `callback`
    pub fn fill_in_then<F>(
        &mut self,
        target: impl Into<Target>,
        text: impl Into<String>,
        callback: F,
    ) -> &mut Self
    where
        F: FnOnce(ElementSet) + Send + 'static,
    {
        self.enqueue_fill(
            target.into(),
            text.into(),
            SelectorKind::Default,
            Some(Box::new(callback)),
        )
    }

    /// Type `text` into the `<input>` for `target`
    pub fn fill_in_input(
        &mut self,
        target: impl Into<Target>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_fill(target.into(), text.into(), SelectorKind::Input, None)
    }

    /// Click the element for `target`
    pub fn click(&mut self, target: impl Into<Target>) -> &mut Self {
        self.enqueue_click(target.into(), SelectorKind::Default)
    }

    /// Click the `<button>` for `target`
    pub fn click_button(&mut self, target: impl Into<Target>) -> &mut Self {
        self.enqueue_click(target.into(), SelectorKind::Button)
    }

    /// Click the `<a>` for `target`
    pub fn click_link(&mut self, target: impl Into<Target>) -> &mut Self {
        self.enqueue_click(target.into(), SelectorKind::Link)
    }

    /// Click the element for `target` whose text contains `text`
    pub fn click_by_text(&mut self, target: impl Into<Target>, text: &str) -> &mut Self {
        self.click(target.into().with_text(text))
    }

    fn enqueue_click(&mut self, target: Target, kind: SelectorKind) -> &mut Self {
        self.and_then(move |cx| {
            Box::pin(async move {
                let selector = kind.resolve(cx.bridge, &target);
                let context = target.context.as_deref();
                if cx.config.strict_clicks && cx.driver.find(&selector, context).await?.is_empty()
                {
                    return Err(PageError::ElementNotFound { selector });
                }
                tracing::debug!(%selector, ?context, "click");
                cx.driver.click(&selector, context).await
            })
        })
    }

    fn enqueue_fill(
        &mut self,
        target: Target,
        text: String,
        kind: SelectorKind,
        callback: Option<Box<dyn FnOnce(ElementSet) + Send>>,
    ) -> &mut Self {
        self.and_then(move |cx| {
            Box::pin(async move {
                let selector = kind.resolve(cx.bridge, &target);
                let context = target.context.as_deref();
                tracing::debug!(%selector, ?context, "fill in");
                cx.driver.fill_in(&selector, context, &text).await?;
                if let Some(callback) = callback {
                    callback(cx.driver.find(&selector, context).await?);
                }
                Ok(())
            })
        })
    }

    // Queries

    /// Query the elements for `target` right away
    pub async fn find(&self, target: impl Into<Target>) -> PageResult<ElementSet> {
        let target = target.into();
        let selector = SelectorKind::Default.resolve(self.bridge.as_ref(), &target);
        self.driver.find(&selector, target.context.as_deref()).await
    }

    /// Query the elements for `target` whose text contains `text`
    pub async fn find_by_text(
        &self,
        target: impl Into<Target>,
        text: &str,
    ) -> PageResult<ElementSet> {
        self.find(target.into().with_text(text)).await
    }

    // Assertions

    /// Assert at least one element matches `target`
    pub fn assert_present(&mut self, target: impl Into<Target>) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::Present, true, None)
    }

    /// [`PageObject::assert_present`] with a custom message
    pub fn assert_present_with_message(
        &mut self,
        target: impl Into<Target>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::Present, true, Some(message.into()))
    }

    /// Assert no element matches `target`
    pub fn assert_not_present(&mut self, target: impl Into<Target>) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::Present, false, None)
    }

    /// [`PageObject::assert_not_present`] with a custom message
    pub fn assert_not_present_with_message(
        &mut self,
        target: impl Into<Target>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::Present, false, Some(message.into()))
    }

    /// Assert an element for `target` carries `class`
    pub fn assert_has_class(&mut self, target: impl Into<Target>, class: &str) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::HasClass(class.to_string()), true, None)
    }

    /// [`PageObject::assert_has_class`] with a custom message
    pub fn assert_has_class_with_message(
        &mut self,
        target: impl Into<Target>,
        class: &str,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(
            target.into(),
            ElementCheck::HasClass(class.to_string()),
            true,
            Some(message.into()),
        )
    }

    /// Assert no element for `target` carries `class`
    pub fn assert_not_has_class(&mut self, target: impl Into<Target>, class: &str) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::HasClass(class.to_string()), false, None)
    }

    /// [`PageObject::assert_not_has_class`] with a custom message
    pub fn assert_not_has_class_with_message(
        &mut self,
        target: impl Into<Target>,
        class: &str,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(
            target.into(),
            ElementCheck::HasClass(class.to_string()),
            false,
            Some(message.into()),
        )
    }

    /// Assert the text of `target` contains `text`
    pub fn assert_has_text(&mut self, target: impl Into<Target>, text: &str) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::HasText(text.to_string()), true, None)
    }

    /// [`PageObject::assert_has_text`] with a custom message
    pub fn assert_has_text_with_message(
        &mut self,
        target: impl Into<Target>,
        text: &str,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(
            target.into(),
            ElementCheck::HasText(text.to_string()),
            true,
            Some(message.into()),
        )
    }

    /// Assert the text of `target` does not contain `text`
    pub fn assert_not_has_text(&mut self, target: impl Into<Target>, text: &str) -> &mut Self {
        self.enqueue_assert(target.into(), ElementCheck::HasText(text.to_string()), false, None)
    }

    /// [`PageObject::assert_not_has_text`] with a custom message
    pub fn assert_not_has_text_with_message(
        &mut self,
        target: impl Into<Target>,
        text: &str,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert(
            target.into(),
            ElementCheck::HasText(text.to_string()),
            false,
            Some(message.into()),
        )
    }

    /// Assert the current URL equals `url`
    pub fn assert_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.enqueue_assert_url(url.into(), None)
    }

    /// [`PageObject::assert_url`] with a custom message
    pub fn assert_url_with_message(
        &mut self,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.enqueue_assert_url(url.into(), Some(message.into()))
    }

    /// Assert the current URL fits this page's URL template
    pub fn assert_on_page(&mut self) -> &mut Self {
        let matcher = UrlMatcher::new(self.page.url());
        self.and_then(move |cx| {
            Box::pin(async move {
                let current = cx.driver.current_url().await?;
                let message = format!("current url matches: '{}'", matcher.pattern());
                cx.assert.equal(
                    &Observation::Bool(matcher.matches(&current)),
                    &Observation::Bool(true),
                    &message,
                );
                Ok(())
            })
        })
    }

    fn enqueue_assert(
        &mut self,
        target: Target,
        check: ElementCheck,
        expected: bool,
        message: Option<String>,
    ) -> &mut Self {
        self.and_then(move |cx| {
            Box::pin(async move {
                let selector = cx.selector(&target);
                let found = cx.driver.find(&selector, target.context.as_deref()).await?;
                let message = message.unwrap_or_else(|| check.message(&selector, expected));
                cx.assert.equal(
                    &Observation::Bool(check.observe(&found)),
                    &Observation::Bool(expected),
                    &message,
                );
                Ok(())
            })
        })
    }

    fn enqueue_assert_url(&mut self, url: String, message: Option<String>) -> &mut Self {
        self.and_then(move |cx| {
            Box::pin(async move {
                let current = cx.driver.current_url().await?;
                let message = message.unwrap_or_else(|| format!("current url is: '{url}'"));
                cx.assert
                    .equal(&Observation::Text(current), &Observation::Text(url), &message);
                Ok(())
            })
        })
    }

    // Utilities

    /// Stub the response for `path` on the mock server
    pub fn prepare_response(
        &mut self,
        path: impl Into<String>,
        options: ResponseOptions,
    ) -> &mut Self {
        let path = path.into();
        self.and_then(move |cx| {
            Box::pin(async move {
                let (method, stub) = options.resolve()?;
                let server = cx.server.ok_or_else(|| PageError::MissingServer {
                    method: method.to_string(),
                    path: path.clone(),
                })?;
                server.register(method, &path, stub);
                Ok(())
            })
        })
    }

    /// Halt the test for inspection
    pub fn pause(&mut self) -> &mut Self {
        self.and_then(|cx| Box::pin(async move { cx.driver.pause_test().await }))
    }

    /// Grow the test container to the configured size
    pub fn embiggen(&mut self) -> &mut Self {
        self.and_then(|cx| {
            Box::pin(async move {
                let container = &cx.config.container;
                cx.driver
                    .resize_container(&container.selector, &container.width, &container.height)
                    .await
            })
        })
    }

    /// Log where the test stands, then halt for inspection
    pub fn debug(&mut self) -> &mut Self {
        self.and_then(|cx| {
            Box::pin(async move {
                let url = cx.driver.current_url().await?;
                tracing::info!(
                    page = cx.page_name,
                    %url,
                    bridge = ?cx.bridge,
                    "paused for debugging; queue an and_then step to reach the driver and application"
                );
                cx.driver.pause_test().await
            })
        })
    }
}
