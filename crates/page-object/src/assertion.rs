//! Assertion sinks.
//!
//! A page object never decides pass/fail itself: every assertion computes an
//! observation and hands `(actual, expected, message)` to a sink.
//!
//! ## Sinks
//! - [`StrictAssert`]: panics on the first mismatch, like `assert_eq!`
//! - [`RecordingSink`]: collects results (soft assertions), optionally
//!   failing fast

use crate::result::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Value observed on the page or expected by a test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observation {
    /// Boolean observation (presence, class membership, text containment)
    Bool(bool),
    /// Text observation (current URL)
    Text(String),
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(t) => write!(f, "{t:?}"),
        }
    }
}

impl From<bool> for Observation {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Observation {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Observation {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Receiver of assertion outcomes
pub trait AssertionSink: Send + Sync {
    /// Report that `actual` was observed where `expected` was wanted
    fn equal(&self, actual: &Observation, expected: &Observation, message: &str);
}

/// Sink that panics on mismatch
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictAssert;

impl AssertionSink for StrictAssert {
    fn equal(&self, actual: &Observation, expected: &Observation, message: &str) {
        assert!(
            actual == expected,
            "{message}: expected {expected}, got {actual}"
        );
    }
}

/// One recorded assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionRecord {
    /// Observed value
    pub actual: Observation,
    /// Expected value
    pub expected: Observation,
    /// Human-readable message
    pub message: String,
    /// Whether actual matched expected
    pub passed: bool,
}

/// Mode for [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssertionMode {
    /// Collect all results (default)
    #[default]
    Collect,
    /// Panic on the first failure
    FailFast,
}

/// Sink that records every assertion
///
/// Clones share the same record list, so a test keeps one clone and hands
/// another to the page object.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<AssertionRecord>>>,
    mode: AssertionMode,
}

impl RecordingSink {
    /// Create a collecting sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink with the given mode
    #[must_use]
    pub fn with_mode(mode: AssertionMode) -> Self {
        Self {
            records: Arc::default(),
            mode,
        }
    }

    /// All recorded assertions
    #[must_use]
    pub fn records(&self) -> Vec<AssertionRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Failed assertions only
    #[must_use]
    pub fn failures(&self) -> Vec<AssertionRecord> {
        self.records().into_iter().filter(|r| !r.passed).collect()
    }

    /// Number of recorded assertions
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether every recorded assertion passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures().is_empty()
    }

    /// Turn collected failures into an error
    pub fn verify(&self) -> PageResult<()> {
        let failures = self.failures();
        if failures.is_empty() {
            return Ok(());
        }
        let summary = failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(PageError::AssertionsFailed {
            failed: failures.len(),
            total: self.count(),
            summary,
        })
    }

    /// Forget all records
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl AssertionSink for RecordingSink {
    fn equal(&self, actual: &Observation, expected: &Observation, message: &str) {
        let passed = actual == expected;
        if !passed {
            tracing::debug!(%actual, %expected, description = message, "assertion failed");
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(AssertionRecord {
                actual: actual.clone(),
                expected: expected.clone(),
                message: message.to_string(),
                passed,
            });
        }
        if !passed && self.mode == AssertionMode::FailFast {
            panic!("{message}: expected {expected}, got {actual}");
        }
    }
}
