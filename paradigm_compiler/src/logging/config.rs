//! Process-wide logging preferences
//!
//! The CLI installs preferences once, before `init_global_logging`. Until
//! then, and for library callers that never install any, the environment
//! defaults of [`LoggingPreferences`] apply.

use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static INSTALLED: OnceLock<LoggingPreferences> = OnceLock::new();
static ENVIRONMENT: OnceLock<LoggingPreferences> = OnceLock::new();

pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    INSTALLED
        .set(preferences)
        .map_err(|_| "Runtime logging preferences already initialized".to_string())
}

pub fn preferences() -> &'static LoggingPreferences {
    INSTALLED
        .get()
        .unwrap_or_else(|| ENVIRONMENT.get_or_init(LoggingPreferences::default))
}

/// Read on every `log_debug!`
pub fn min_log_level() -> LogLevel {
    preferences().min_log_level
}

/// Preferences behind `--verbose`
pub fn verbose_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: LogLevel::Debug,
        enable_cargo_style_output: true,
        include_file_context: true,
    }
}
