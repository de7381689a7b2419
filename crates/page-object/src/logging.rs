//! Tracing setup for test binaries.
//!
//! Page objects emit `tracing` events (queued steps at `trace`, driver
//! interactions and stubs at `debug`, aborted queues at `warn`). Nothing is
//! printed unless a subscriber is installed; call [`init_test_logging`] at
//! the top of a test to see them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Install a subscriber writing through the test harness' captured output.
///
/// Honors `RUST_LOG`. Safe to call from every test: only the first call in a
/// process installs anything.
pub fn init_test_logging() {
    init_logging(LogFormat::Pretty);
}

/// Install a subscriber in the given format.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_logging(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_test_writer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_test_writer())
            .try_init(),
    };
    result.is_ok()
}
