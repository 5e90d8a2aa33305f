//! Log sinks and the level filter in front of them

use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use crate::logging::Code;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `[LEVEL] CODE - message at line:col`
    Plain,
    /// One JSON object per line
    Json,
}

/// Writes to stderr; stdout carries the reports
pub struct ConsoleLogger {
    format: LogFormat,
}

impl ConsoleLogger {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    fn render(&self, event: &LogEvent) -> String {
        let line = match self.format {
            LogFormat::Plain => event.to_string(),
            LogFormat::Json => event.to_json_line().unwrap_or_else(|_| event.to_string()),
        };
        clip(line, MAX_LOG_MESSAGE_LENGTH)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", self.render(event));
    }
}

fn clip(mut line: String, limit: usize) -> String {
    if line.len() > limit {
        let mut cut = limit;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
        line.push_str("...");
    }
    line
}

/// Keeps the most recent `LOG_BUFFER_SIZE` events
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().iter().cloned().collect()
    }

    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.code == Some(code))
            .cloned()
            .collect()
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == level)
            .count()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events.lock().unwrap();
        if events.len() == LOG_BUFFER_SIZE {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Drops events more verbose than `min_level`, forwards the rest
pub struct LoggingService {
    sink: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(sink: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Console service for the given preferences.
    ///
    /// Without `enable_console_logging` only warnings and errors reach stderr.
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let min_level = if preferences.enable_console_logging {
            preferences.min_log_level
        } else {
            preferences.min_log_level.min(LogLevel::Warning)
        };
        let format = if preferences.use_structured_logging {
            LogFormat::Json
        } else {
            LogFormat::Plain
        };

        Self::new(Arc::new(ConsoleLogger::new(format)), min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log(&self, event: &LogEvent) {
        if self.enabled(event.level) {
            self.sink.log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log(&LogEvent::new(LogLevel::Debug, None, "Applied production"));
        service.log(&LogEvent::success(codes::success::PARSE_ACCEPTED, "Accepted"));
        service.log(&LogEvent::warning(codes::warnings::LONG_IDENTIFIER, "Long identifier"));
        service.log(&LogEvent::error(codes::syntax::NO_PARSING_RULE, "No rule"));

        assert_eq!(memory.events().len(), 2);
        assert_eq!(memory.count_at(LogLevel::Error), 1);
        assert_eq!(memory.with_code(codes::warnings::LONG_IDENTIFIER).len(), 1);
        assert!(memory.with_code(codes::success::PARSE_ACCEPTED).is_empty());
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let memory = MemoryLogger::new();
        for i in 0..LOG_BUFFER_SIZE + 5 {
            memory.log(&LogEvent::new(LogLevel::Info, None, format!("event {}", i)));
        }

        let events = memory.events();
        assert_eq!(events.len(), LOG_BUFFER_SIZE);
        assert_eq!(events[0].message, "event 5");
    }

    #[test]
    fn test_service_from_preferences() {
        let mut preferences = LoggingPreferences {
            use_structured_logging: false,
            enable_console_logging: false,
            min_log_level: LogLevel::Debug,
            enable_cargo_style_output: true,
            include_file_context: true,
        };
        let quiet = LoggingService::from_preferences(&preferences);
        assert_eq!(quiet.min_level(), LogLevel::Warning);
        assert!(!quiet.enabled(LogLevel::Info));

        preferences.enable_console_logging = true;
        assert_eq!(
            LoggingService::from_preferences(&preferences).min_level(),
            LogLevel::Debug
        );
    }

    #[test]
    fn test_console_render() {
        let event = LogEvent::error(codes::syntax::TRAILING_INPUT, "Trailing input");

        let plain = ConsoleLogger::new(LogFormat::Plain).render(&event);
        assert_eq!(plain, "[ERROR] E052 - Trailing input");

        let json = ConsoleLogger::new(LogFormat::Json).render(&event);
        assert!(json.starts_with('{'));
        assert!(json.contains("\"code\":\"E052\""));
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        let clipped = clip("é".repeat(10), 5);
        assert_eq!(clipped, "éé...");
        assert_eq!(clip("short".to_string(), 10), "short");
    }
}
