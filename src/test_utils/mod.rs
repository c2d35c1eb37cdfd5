//! Test helpers shared by unit and integration tests.
//!
//! Available in `#[cfg(test)]` builds and to integration tests through the
//! `test-utils` feature.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::CompilerConfig;
use crate::platform::Platform;
use crate::templating::RenderContext;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging
/// stays off.
///
/// ```rust,no_run
/// skillforge::test_utils::init_test_logging(Some(tracing::Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Config with fixed project fields, as used by snapshot-style tests.
#[must_use]
pub fn test_config() -> CompilerConfig {
    CompilerConfig {
        version: "1.8.1".to_string(),
        project_name: "get-shit-done".to_string(),
        ..CompilerConfig::default()
    }
}

/// Render context dated 2026-01-28 so generated metadata is stable.
#[must_use]
pub fn fixed_context(platform: Platform, config: &CompilerConfig) -> RenderContext {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 28).unwrap_or_default();
    RenderContext::for_platform_at(platform, config, date)
}
