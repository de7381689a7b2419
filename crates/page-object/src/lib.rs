//! Page objects for browser acceptance tests.
//!
//! A page object wraps a page (or component) of the application under test
//! and exposes fluent, chainable interactions and assertions addressed by
//! logical names instead of raw selectors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Target    ┌──────────┐  selector  ┌──────────┐
//! │  PageObject  │────────────►│  Bridge  │───────────►│  Driver  │
//! │  (step queue)│             └──────────┘            └──────────┘
//! │              │  (actual, expected, message)  ┌───────────────┐
//! │              │──────────────────────────────►│ AssertionSink │
//! │              │  prepare_response             ┌───────────────┐
//! │              │──────────────────────────────►│  MockServer   │
//! └──────────────┘                               └───────────────┘
//! ```
//!
//! Every chained call appends a step; [`PageObject::run`] drains the queue
//! strictly in order. Queries ([`PageObject::find`]) run immediately.
//!
//! # Example
//!
//! ```ignore
//! use page_object::prelude::*;
//!
//! let sink = RecordingSink::new();
//! let mut page = PageObject::builder(driver).assert(sink.clone()).build();
//! page.visit("/login")
//!     .fill_in("email", "ada@example.com")
//!     .click_button("submit")
//!     .assert_url("/dashboard");
//! page.run().await?;
//! sink.verify()?;
//! ```

#![warn(missing_docs)]

mod assertion;
mod bridge;
mod config;
mod driver;
mod element;
pub mod logging;
mod network;
mod page_object;
mod result;
mod url;

pub use assertion::{
    AssertionMode, AssertionRecord, AssertionSink, Observation, RecordingSink, StrictAssert,
};
pub use bridge::{
    AttributeBridge, Bridge, BridgeConfig, BridgeStyle, ClassBridge, PassthroughBridge,
    DEFAULT_ATTRIBUTE_NAME,
};
pub use config::{ContainerConfig, PageConfig};
pub use driver::{Driver, DriverCall, MockDriver};
pub use element::{contains_filter, ElementHandle, ElementSet, Target};
pub use network::{
    HandledRequest, HttpMethod, MockServer, ResponseOptions, ResponseStub, StubRoute, StubServer,
    DEFAULT_CONTENT_TYPE,
};
pub use page_object::{
    Page, PageObject, PageObjectBuilder, RootPage, SimplePage, StepContext,
};
pub use result::{PageError, PageResult};
pub use url::{replace_url_segments, UrlMatcher, UrlSegments};

#[cfg(feature = "derive")]
pub use page_object_derive::Page;

/// Re-exports for `use page_object::prelude::*`
pub mod prelude {
    pub use crate::{
        AssertionSink, Bridge, Driver, ElementSet, Observation, Page, PageConfig, PageError,
        PageObject, PageResult, RecordingSink, ResponseOptions, StepContext, StubServer, Target,
        UrlSegments,
    };
}
