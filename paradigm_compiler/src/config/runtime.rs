// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub use crate::logging::events::LogLevel;

/// Failure to load a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Only accept files with this extension (no leading dot); `None` accepts any file
    pub required_extension: Option<String>,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            required_extension: env::var(env_vars::REQUIRED_EXTENSION)
                .ok()
                .map(|v| v.trim_start_matches('.').to_string())
                .filter(|v| !v.is_empty()),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether each recoverable lexical error is sent to the logger as it happens
    pub log_lexical_errors: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            log_lexical_errors: env::var(env_vars::LEXICAL_LOG_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_errors: env::var(env_vars::LEXICAL_INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether accepted parses keep the ordered list of applied productions
    pub record_production_trace: bool,

    /// Whether every applied production is logged at debug level
    pub log_applied_productions: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            record_production_trace: env::var(env_vars::SYNTAX_RECORD_TRACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_applied_productions: env::var(env_vars::SYNTAX_LOG_PRODUCTIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text; absent sections and keys keep their defaults
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_toml_str(&content, &origin)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRED_EXTENSION: &str = "PARADIGM_REQUIRED_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "PARADIGM_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_LOG_ERRORS: &str = "PARADIGM_LEXICAL_LOG_ERRORS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "PARADIGM_LEXICAL_INCLUDE_POSITIONS";

    // Syntax
    pub const SYNTAX_RECORD_TRACE: &str = "PARADIGM_SYNTAX_RECORD_TRACE";
    pub const SYNTAX_LOG_PRODUCTIONS: &str = "PARADIGM_SYNTAX_LOG_PRODUCTIONS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "PARADIGM_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "PARADIGM_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "PARADIGM_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "PARADIGM_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "PARADIGM_LOGGING_INCLUDE_FILE_CONTEXT";
}
