//! Selector bridges.
//!
//! A bridge turns a logical element reference (`"save-button"`) plus an
//! optional filter suffix (`":first"`) into a concrete selector string. The
//! interaction style is pluggable: data attributes, CSS classes, or raw
//! selectors passed through untouched.
//!
//! Every bridge must provide all four selector capabilities; the trait has
//! no default bodies, so an incomplete bridge does not compile.
//!
//! ```ignore
//! let bridge = AttributeBridge::new();
//! assert_eq!(bridge.button_selector("save", ""), r#"button[data-test-selector="save"]"#);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Default attribute used by [`AttributeBridge`]
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-test-selector";

/// Strategy for building selectors from logical element references.
///
/// The four selector capabilities are required; leaving one out is a
/// compile error:
///
/// ```compile_fail
/// use page_object::Bridge;
///
/// #[derive(Debug)]
/// struct NoInputs;
///
/// impl Bridge for NoInputs {
///     fn default_selector(&self, value: &str, filter: &str) -> String {
///         format!("#{value}{filter}")
///     }
///     fn button_selector(&self, value: &str, filter: &str) -> String {
///         format!("button#{value}{filter}")
///     }
///     fn link_selector(&self, value: &str, filter: &str) -> String {
///         format!("a#{value}{filter}")
///     }
/// }
/// ```
pub trait Bridge: Debug + Send + Sync {
    /// Selector matching any element carrying `value`, refined by `filter`
    fn default_selector(&self, value: &str, filter: &str) -> String;

    /// Selector restricted to `<button>` elements
    fn button_selector(&self, value: &str, filter: &str) -> String;

    /// Selector restricted to `<a>` elements
    fn link_selector(&self, value: &str, filter: &str) -> String;

    /// Selector restricted to `<input>` elements
    fn input_selector(&self, value: &str, filter: &str) -> String;

    /// Configuration property the bridge was built with
    fn property(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Which bridge a [`BridgeConfig`] builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeStyle {
    /// `[attr="value"]` selectors
    #[default]
    Attribute,
    /// `.prefix-value` selectors
    Class,
    /// Values are already selectors
    Passthrough,
}

/// Immutable bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bridge variant to build
    pub style: BridgeStyle,
    /// Attribute name for [`BridgeStyle::Attribute`]
    pub attribute_name: String,
    /// Class prefix for [`BridgeStyle::Class`]
    pub class_prefix: String,
    /// Extra properties, retained verbatim for custom bridges
    pub properties: BTreeMap<String, String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            style: BridgeStyle::Attribute,
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            class_prefix: String::new(),
            properties: BTreeMap::new(),
        }
    }
}

impl BridgeConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bridge style
    #[must_use]
    pub const fn with_style(mut self, style: BridgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the attribute name
    #[must_use]
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    /// Set the class prefix
    #[must_use]
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Add an extra property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.properties.insert(name.into(), value.into());
        self
    }

    /// Look up an extra property
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Build the configured bridge
    #[must_use]
    pub fn build(&self) -> Box<dyn Bridge> {
        match self.style {
            BridgeStyle::Attribute => Box::new(AttributeBridge::with_config(self.clone())),
            BridgeStyle::Class => Box::new(ClassBridge::with_config(self.clone())),
            BridgeStyle::Passthrough => Box::new(PassthroughBridge::with_config(self.clone())),
        }
    }
}

fn tag_scoped(tag: &str, bridge: &dyn Bridge, value: &str, filter: &str) -> String {
    format!("{tag}{}", bridge.default_selector(value, filter))
}

/// Bridge selecting elements by a data attribute
#[derive(Debug, Clone, Default)]
pub struct AttributeBridge {
    config: BridgeConfig,
}

impl AttributeBridge {
    /// Bridge on the `data-test-selector` attribute
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bridge on a custom attribute
    #[must_use]
    pub fn with_attribute(name: impl Into<String>) -> Self {
        Self::with_config(BridgeConfig::new().with_attribute_name(name))
    }

    /// Bridge from a full configuration
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Attribute the selectors match on
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.config.attribute_name
    }

    /// Configuration this bridge was built from
    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl Bridge for AttributeBridge {
    fn default_selector(&self, value: &str, filter: &str) -> String {
        format!("[{}=\"{value}\"]{filter}", self.config.attribute_name)
    }

    fn button_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("button", self, value, filter)
    }

    fn link_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("a", self, value, filter)
    }

    fn input_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("input", self, value, filter)
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.config.property(name)
    }
}

/// Bridge selecting elements by CSS class
#[derive(Debug, Clone, Default)]
pub struct ClassBridge {
    config: BridgeConfig,
}

impl ClassBridge {
    /// Bridge with a class prefix, e.g. `"test-"`
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_config(
            BridgeConfig::new()
                .with_style(BridgeStyle::Class)
                .with_class_prefix(prefix),
        )
    }

    /// Bridge from a full configuration
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Class prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.config.class_prefix
    }
}

impl Bridge for ClassBridge {
    fn default_selector(&self, value: &str, filter: &str) -> String {
        format!(".{}{value}{filter}", self.config.class_prefix)
    }

    fn button_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("button", self, value, filter)
    }

    fn link_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("a", self, value, filter)
    }

    fn input_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("input", self, value, filter)
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.config.property(name)
    }
}

/// Bridge for values that are already selectors
#[derive(Debug, Clone, Default)]
pub struct PassthroughBridge {
    config: BridgeConfig,
}

impl PassthroughBridge {
    /// Bridge with no extra properties
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bridge carrying a configuration for its properties
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self { config }
    }
}

impl Bridge for PassthroughBridge {
    fn default_selector(&self, value: &str, filter: &str) -> String {
        format!("{value}{filter}")
    }

    fn button_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("button", self, value, filter)
    }

    fn link_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("a", self, value, filter)
    }

    fn input_selector(&self, value: &str, filter: &str) -> String {
        tag_scoped("input", self, value, filter)
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.config.property(name)
    }
}
