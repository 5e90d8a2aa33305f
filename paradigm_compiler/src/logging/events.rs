//! Structured log events
//!
//! Diagnostics (errors, warnings, stage completions) carry a registered
//! [`Code`]; progress messages from `log_info!` and `log_debug!` do not.

use super::codes::{self, Code, ErrorMetadata};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered from least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, code: Option<Code>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.into(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, Some(code), message)
    }

    pub fn warning(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, Some(code), message)
    }

    /// A stage finished; info level with its completion code
    pub fn success(code: Code, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, Some(code), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    /// Registry entry for the event's code, if it has a registered one
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        self.code.and_then(|code| codes::get_error_metadata(code.as_str()))
    }

    /// Recommended action, only for errors whose code lists one
    pub fn help(&self) -> Option<&'static str> {
        if !self.is_error() {
            return None;
        }
        self.metadata()
            .map(|metadata| metadata.recommended_action)
            .filter(|action| *action != "None")
    }

    /// Multi-line form with the registry metadata and context
    pub fn render_detailed(&self) -> String {
        let mut lines = vec![self.to_string()];

        if let Some(metadata) = self.metadata() {
            lines.push(format!(
                "  {} / {} severity: {}",
                metadata.category,
                metadata.severity.as_str(),
                metadata.description
            ));
            if self.is_error() {
                lines.push(format!(
                    "  recoverable: {}, halts: {}",
                    metadata.recoverable, metadata.requires_halt
                ));
            }
        }
        if let Some(help) = self.help() {
            lines.push(format!("  help: {}", help));
        }
        lines.extend(
            self.context
                .iter()
                .map(|(key, value)| format!("  {} = {}", key, value)),
        );

        lines.join("\n")
    }

    /// One JSON object per event, with category and severity inlined
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct JsonLine<'a> {
            #[serde(flatten)]
            event: &'a LogEvent,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            severity: Option<&'static str>,
        }

        let metadata = self.metadata();
        serde_json::to_string(&JsonLine {
            event: self,
            category: metadata.map(|m| m.category),
            severity: metadata.map(|m| m.severity.as_str()),
        })
    }
}

/// `[LEVEL] CODE - message at line:col`; codeless events omit `CODE - `
impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.level)?;
        if let Some(code) = self.code {
            write!(f, "{} - ", code)?;
        }
        f.write_str(&self.message)?;
        if let Some(span) = &self.span {
            write!(f, " at {}:{}", span.start().line, span.start().column)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_short_form() {
        let event = LogEvent::error(codes::lexical::INVALID_CHARACTER, "Invalid character '#'")
            .with_span(Span::single(Position::new(4, 1, 5)));
        assert_eq!(event.to_string(), "[ERROR] E020 - Invalid character '#' at 1:5");

        let progress = LogEvent::new(LogLevel::Info, None, "Starting batch");
        assert_eq!(progress.to_string(), "[INFO] Starting batch");
    }

    #[test]
    fn test_detailed_form() {
        let event = LogEvent::error(codes::syntax::NO_PARSING_RULE, "No rule for <TYPE> on ';'")
            .with_context("lookahead", ";");

        let detailed = event.render_detailed();
        assert!(detailed.starts_with("[ERROR] E051 - No rule"));
        assert!(detailed.contains("Syntax / "));
        assert!(detailed.contains("halts: true"));
        assert!(detailed.contains("help: "));
        assert!(detailed.contains("lookahead = ;"));
    }

    #[test]
    fn test_help_only_for_errors() {
        let warning = LogEvent::warning(codes::warnings::MISSING_SENTINEL, "No sentinel");
        assert!(warning.is_warning());
        assert_eq!(warning.help(), None);

        let success = LogEvent::success(codes::success::PARSE_ACCEPTED, "Accepted");
        assert!(!success.is_error());
        assert_eq!(success.metadata().map(|m| m.category), Some("Success"));
    }

    #[test]
    fn test_json_line() {
        let event = LogEvent::error(codes::syntax::NO_PARSING_RULE, "No rule")
            .with_span(Span::single(Position::new(0, 1, 1)))
            .with_context("lookahead", ";");

        let value: serde_json::Value = serde_json::from_str(&event.to_json_line().unwrap()).unwrap();
        assert_eq!(value["level"], "Error");
        assert_eq!(value["code"], "E051");
        assert_eq!(value["category"], "Syntax");
        assert_eq!(value["context"]["lookahead"], ";");
        assert_eq!(value["span"]["start"]["line"], 1);

        let bare = LogEvent::new(LogLevel::Debug, None, "step");
        let value: serde_json::Value = serde_json::from_str(&bare.to_json_line().unwrap()).unwrap();
        assert!(value.get("code").is_none());
        assert!(value.get("context").is_none());
    }
}
