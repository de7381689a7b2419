//! Page object configuration.
//!
//! ```yaml
//! bridge:
//!   style: attribute
//!   attribute_name: data-test
//! strict_clicks: true
//! container:
//!   selector: "#app-root"
//! ```

use crate::bridge::BridgeConfig;
use crate::result::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element resized by `embiggen`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Selector of the test container
    pub selector: String,
    /// CSS width applied by `embiggen`
    pub width: String,
    /// CSS height applied by `embiggen`
    pub height: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            selector: "#ember-testing-container".to_string(),
            width: "100vw".to_string(),
            height: "100vh".to_string(),
        }
    }
}

/// Configuration shared by every step of a page object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Bridge used when none is supplied to the builder
    pub bridge: BridgeConfig,
    /// Require clicked elements to exist before clicking
    pub strict_clicks: bool,
    /// Test container settings
    pub container: ContainerConfig,
}

impl PageConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bridge configuration
    #[must_use]
    pub fn with_bridge(mut self, bridge: BridgeConfig) -> Self {
        self.bridge = bridge;
        self
    }

    /// Enable or disable find-before-click
    #[must_use]
    pub const fn with_strict_clicks(mut self, strict: bool) -> Self {
        self.strict_clicks = strict;
        self
    }

    /// Set the test container
    #[must_use]
    pub fn with_container(mut self, container: ContainerConfig) -> Self {
        self.container = container;
        self
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> PageResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> PageResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents),
            Some("json") => Self::from_json(&contents),
            other => Err(PageError::config(format!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{BridgeStyle, DEFAULT_ATTRIBUTE_NAME};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.bridge.style, BridgeStyle::Attribute);
        assert_eq!(config.bridge.attribute_name, DEFAULT_ATTRIBUTE_NAME);
        assert!(!config.strict_clicks);
        assert_eq!(config.container.selector, "#ember-testing-container");
        assert_eq!(config.container.width, "100vw");
        assert_eq!(config.container.height, "100vh");
    }

    #[test]
    fn test_from_yaml_fills_defaults() {
        let yaml = r##"
bridge:
  style: class
  class_prefix: qa-
strict_clicks: true
container:
  selector: "#root"
"##;
        let config = PageConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.bridge.style, BridgeStyle::Class);
        assert_eq!(config.bridge.class_prefix, "qa-");
        assert_eq!(config.bridge.attribute_name, DEFAULT_ATTRIBUTE_NAME);
        assert!(config.strict_clicks);
        assert_eq!(config.container.selector, "#root");
        assert_eq!(config.container.width, "100vw");
    }

    #[test]
    fn test_from_json() {
        let config =
            PageConfig::from_json(r#"{"bridge": {"attribute_name": "data-qa"}}"#).unwrap();
        assert_eq!(config.bridge.attribute_name, "data-qa");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = PageConfig::from_yaml("strict_clicks: [").unwrap_err();
        assert!(matches!(err, PageError::Yaml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "strict_clicks: true").unwrap();
        let config = PageConfig::load(file.path()).unwrap();
        assert!(config.strict_clicks);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = PageConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, PageError::Config { .. }));
    }

    #[test]
    fn test_builder() {
        let config = PageConfig::new()
            .with_strict_clicks(true)
            .with_bridge(BridgeConfig::new().with_attribute_name("data-cy"))
            .with_container(ContainerConfig {
                selector: "#host".to_string(),
                ..ContainerConfig::default()
            });
        assert!(config.strict_clicks);
        assert_eq!(config.bridge.attribute_name, "data-cy");
        assert_eq!(config.container.selector, "#host");
    }
}
